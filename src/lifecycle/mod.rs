//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     serve() called → startup hooks run in registration order → accept traffic
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain requests → Close scheduler
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Fail fast: a failing startup hook is fatal
//! - Each hook set fires at most once per application
//! - The shutdown hook closes the scheduler handle the application was built
//!   with; it never re-fetches the global

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::{Shutdown, ShutdownHook, ShutdownListener};
pub use startup::{StartupError, StartupHook, StartupHooks};

use crate::scheduler::SchedulerError;

/// Startup and shutdown hooks attached to one application.
pub struct Lifecycle {
    startup: StartupHooks,
    shutdown: ShutdownHook,
}

impl Lifecycle {
    pub fn new(shutdown: ShutdownHook) -> Self {
        Self {
            startup: StartupHooks::default(),
            shutdown,
        }
    }

    /// Register work to run when the server starts.
    pub fn add_startup_hook(&mut self, hook: StartupHook) {
        self.startup.push(hook);
    }

    pub fn startup_hook_count(&self) -> usize {
        self.startup.len()
    }

    pub async fn startup(&self) -> Result<(), StartupError> {
        self.startup.run().await
    }

    pub async fn shutdown(&self) -> Result<(), SchedulerError> {
        self.shutdown.run().await
    }
}
