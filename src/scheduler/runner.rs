//! Interval job scheduler.
//!
//! # Responsibilities
//! - Spawn one job loop per scheduled job
//! - Track run counts for reporting
//! - Stop loops and await in-flight runs on close

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::runtime::Handle;
use tokio::sync::OnceCell;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::lifecycle::{Shutdown, ShutdownListener};
use crate::scheduler::job::{JobEntry, JobInfo};
use crate::scheduler::{JobScheduler, SchedulerError};

#[derive(Default)]
struct State {
    closed: bool,
    jobs: Vec<JobEntry>,
    tasks: Vec<JoinHandle<()>>,
}

/// Runs named jobs on fixed intervals until closed.
pub struct Scheduler {
    state: Mutex<State>,
    shutdown: Shutdown,
    drained: OnceCell<Result<(), SchedulerError>>,
}

impl Scheduler {
    /// Create an empty scheduler. No tasks are spawned until a job is added.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
            shutdown: Shutdown::new(),
            drained: OnceCell::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `job` every `every`, starting one interval from now.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule_interval<F, Fut>(
        &self,
        name: impl Into<String>,
        every: Duration,
        job: F,
    ) -> Result<(), SchedulerError>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let name = name.into();
        if every.is_zero() {
            return Err(SchedulerError::InvalidInterval(name));
        }
        let runtime = Handle::try_current().map_err(|_| SchedulerError::NoRuntime)?;

        let mut state = self.lock();
        if state.closed {
            return Err(SchedulerError::Closed);
        }
        if state.jobs.iter().any(|j| j.name == name) {
            return Err(SchedulerError::DuplicateJob(name));
        }

        let runs = Arc::new(AtomicU64::new(0));
        let task = runtime.spawn(job_loop(
            name.clone(),
            every,
            runs.clone(),
            self.shutdown.subscribe(),
            job,
        ));

        tracing::info!(job = %name, interval = ?every, "Job scheduled");
        state.tasks.push(task);
        state.jobs.push(JobEntry { name, every, runs });
        Ok(())
    }

    pub fn jobs(&self) -> Vec<JobInfo> {
        self.lock().jobs.iter().map(JobEntry::info).collect()
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    /// Stop all job loops and wait for in-flight runs to finish.
    ///
    /// Every caller, including concurrent and later ones, returns only after
    /// the loops have drained, with the same result.
    pub async fn close(&self) -> Result<(), SchedulerError> {
        self.drained.get_or_init(|| self.drain()).await.clone()
    }

    async fn drain(&self) -> Result<(), SchedulerError> {
        let tasks = {
            let mut state = self.lock();
            state.closed = true;
            std::mem::take(&mut state.tasks)
        };

        self.shutdown.trigger();
        tracing::info!(jobs = tasks.len(), "Scheduler closing, waiting for job loops");

        let mut panicked = 0;
        for task in tasks {
            if let Err(e) = task.await {
                if e.is_panic() {
                    panicked += 1;
                    tracing::error!(error = %e, "Job task panicked");
                }
            }
        }

        if panicked > 0 {
            return Err(SchedulerError::JobPanicked { count: panicked });
        }
        Ok(())
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JobScheduler for Scheduler {
    fn jobs(&self) -> Vec<JobInfo> {
        Scheduler::jobs(self)
    }

    fn is_closed(&self) -> bool {
        Scheduler::is_closed(self)
    }

    async fn close(&self) -> Result<(), SchedulerError> {
        Scheduler::close(self).await
    }
}

async fn job_loop<F, Fut>(
    name: String,
    every: Duration,
    runs: Arc<AtomicU64>,
    mut shutdown: ShutdownListener,
    job: F,
) where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let mut ticker = time::interval_at(Instant::now() + every, every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = shutdown.recv() => {
                tracing::debug!(job = %name, "Job loop received shutdown signal, exiting");
                break;
            }
            _ = ticker.tick() => {
                job().await;
                let total = runs.fetch_add(1, Ordering::Relaxed) + 1;
                tracing::trace!(job = %name, runs = total, "Job run finished");
            }
        }
    }
}
