//! Background job scheduling subsystem.
//!
//! # Data Flow
//! ```text
//! get_scheduler()            (process-wide, lazily initialized)
//!     → Scheduler::schedule_interval (one tokio task per job)
//!     → job loop: tick → run job → count run
//!
//! Application shutdown hook:
//!     → JobScheduler::close
//!     → stop accepting jobs → signal loops → await in-flight runs
//! ```
//!
//! # Design Decisions
//! - At most one global scheduler per process (`OnceLock`)
//! - Applications receive the scheduler as an injected `JobScheduler` handle
//! - `close()` is idempotent; every caller waits for the same drain
//! - In-flight job runs are awaited, never aborted

pub mod job;
pub mod runner;

pub use job::JobInfo;
pub use runner::Scheduler;

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;

/// Error type for scheduler operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SchedulerError {
    #[error("scheduler is closed")]
    Closed,

    #[error("job `{0}` is already scheduled")]
    DuplicateJob(String),

    #[error("job `{0}` needs a non-zero interval")]
    InvalidInterval(String),

    #[error("jobs can only be scheduled from within a tokio runtime")]
    NoRuntime,

    #[error("{count} job task(s) panicked before the scheduler closed")]
    JobPanicked { count: usize },
}

/// The scheduler surface the application depends on.
#[async_trait]
pub trait JobScheduler: Send + Sync {
    /// Snapshot of the scheduled jobs.
    fn jobs(&self) -> Vec<JobInfo>;

    fn is_closed(&self) -> bool;

    /// Stop accepting work, drain in-flight runs and release task handles.
    async fn close(&self) -> Result<(), SchedulerError>;
}

static SCHEDULER: OnceLock<Arc<Scheduler>> = OnceLock::new();

/// The process-wide scheduler, created on first access.
pub fn get_scheduler() -> Arc<Scheduler> {
    SCHEDULER
        .get_or_init(|| {
            tracing::debug!("Initializing process-wide scheduler");
            Arc::new(Scheduler::new())
        })
        .clone()
}

/// The process-wide scheduler, if something already initialized it.
pub fn try_get_scheduler() -> Option<Arc<Scheduler>> {
    SCHEDULER.get().cloned()
}
