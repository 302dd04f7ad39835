//! Startup hooks.
//!
//! # Responsibilities
//! - Hold async work registered by collaborators
//! - Run it once, in registration order, before traffic is accepted
//!
//! # Design Decisions
//! - Fail fast: the first failing hook aborts startup
//! - No hooks are registered by default; the list is the extension point

use std::sync::atomic::{AtomicBool, Ordering};

use futures_util::future::{BoxFuture, FutureExt};

/// Error raised by a startup hook.
#[derive(Debug, thiserror::Error)]
#[error("startup hook `{hook}` failed: {reason}")]
pub struct StartupError {
    pub hook: String,
    pub reason: String,
}

type HookFn = Box<dyn Fn() -> BoxFuture<'static, Result<(), String>> + Send + Sync>;

/// A named unit of startup work.
pub struct StartupHook {
    name: String,
    run: HookFn,
}

impl StartupHook {
    pub fn new<F, Fut>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<(), String>> + Send + 'static,
    {
        Self {
            name: name.into(),
            run: Box::new(move || f().boxed()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Default)]
pub struct StartupHooks {
    hooks: Vec<StartupHook>,
    started: AtomicBool,
}

impl StartupHooks {
    pub fn push(&mut self, hook: StartupHook) {
        self.hooks.push(hook);
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Run every hook once. Later calls are no-ops.
    pub async fn run(&self) -> Result<(), StartupError> {
        if self.started.swap(true, Ordering::AcqRel) {
            return Ok(());
        }

        tracing::debug!(hooks = self.hooks.len(), "Running startup hooks");
        for hook in &self.hooks {
            (hook.run)().await.map_err(|reason| StartupError {
                hook: hook.name.clone(),
                reason,
            })?;
            tracing::debug!(hook = %hook.name, "Startup hook finished");
        }
        Ok(())
    }
}
