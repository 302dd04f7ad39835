//! Shutdown coordination.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::{watch, OnceCell};

use crate::scheduler::{JobScheduler, SchedulerError};

/// Coordinator for stopping long-running tasks.
///
/// Backed by a watch channel so that tasks subscribing after the trigger
/// still observe it.
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> ShutdownListener {
        ShutdownListener {
            rx: self.tx.subscribe(),
        }
    }

    /// Trigger the shutdown signal.
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }

    /// Get the number of active subscribers (tasks still running).
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving half handed to a task.
pub struct ShutdownListener {
    rx: watch::Receiver<bool>,
}

impl ShutdownListener {
    /// Resolves once shutdown has been triggered.
    ///
    /// Also resolves if the coordinator was dropped.
    pub async fn recv(&mut self) {
        let _ = self.rx.wait_for(|triggered| *triggered).await;
    }
}

/// Closes the application's scheduler handle, once.
pub struct ShutdownHook {
    scheduler: Arc<dyn JobScheduler>,
    fired: AtomicBool,
    outcome: OnceCell<Result<(), SchedulerError>>,
}

impl ShutdownHook {
    pub fn new(scheduler: Arc<dyn JobScheduler>) -> Self {
        Self {
            scheduler,
            fired: AtomicBool::new(false),
            outcome: OnceCell::new(),
        }
    }

    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }

    /// Close the scheduler.
    ///
    /// Concurrent and later calls wait for the first close to finish and get
    /// its result. A close failure is logged and returned to every caller.
    pub async fn run(&self) -> Result<(), SchedulerError> {
        self.fired.store(true, Ordering::Release);
        self.outcome.get_or_init(|| self.close_scheduler()).await.clone()
    }

    async fn close_scheduler(&self) -> Result<(), SchedulerError> {
        tracing::info!("Closing scheduler");
        match self.scheduler.close().await {
            Ok(()) => {
                tracing::info!("Scheduler closed");
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Scheduler did not close cleanly");
                Err(e)
            }
        }
    }
}
