//! Application factory.
//!
//! # Responsibilities
//! - Resolve settings (injected, or loaded from file + environment)
//! - Attach settings, scheduler handle and schema document as router state
//! - Mount the v1 routes under the API prefix
//! - Install the middleware plan
//! - Wire the lifecycle hooks to the scheduler handle
//!
//! # Design Decisions
//! - Single source of truth for composition; entry points only serve
//! - Construction either fully succeeds or returns the settings error
//! - Each call builds an independent application; only the global scheduler
//!   is shared between applications built with `create_app`

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::http::middleware;
use crate::http::openapi::build_document;
use crate::lifecycle::{Lifecycle, ShutdownHook, StartupHook};
use crate::routes::{self, handlers};
use crate::scheduler::{get_scheduler, JobScheduler};
use crate::settings::{Settings, SettingsError};

/// State injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub scheduler: Arc<dyn JobScheduler>,
    pub openapi: Arc<utoipa::openapi::OpenApi>,
}

/// A composed, ready-to-serve application.
pub struct Application {
    router: Router,
    settings: Arc<Settings>,
    middleware: Vec<&'static str>,
    lifecycle: Lifecycle,
}

impl Application {
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn shared_settings(&self) -> Arc<Settings> {
        self.settings.clone()
    }

    /// Names of the installed middleware, innermost first.
    pub fn middleware(&self) -> &[&'static str] {
        &self.middleware
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    /// Register work to run once when the server starts.
    pub fn on_startup(mut self, hook: StartupHook) -> Self {
        self.lifecycle.add_startup_hook(hook);
        self
    }

    pub fn into_parts(self) -> (Router, Lifecycle) {
        (self.router, self.lifecycle)
    }
}

/// Build the application around the process-wide scheduler.
///
/// Without `settings`, they are loaded from `settings.toml` and the
/// environment; a load failure is returned as is.
pub fn create_app(settings: Option<Settings>) -> Result<Application, SettingsError> {
    let settings = match settings {
        Some(settings) => settings,
        None => Settings::load()?,
    };
    create_app_with_scheduler(settings, get_scheduler())
}

/// Build the application around an explicit scheduler handle.
pub fn create_app_with_scheduler(
    settings: Settings,
    scheduler: Arc<dyn JobScheduler>,
) -> Result<Application, SettingsError> {
    let settings = Arc::new(settings.validated()?);

    tracing::info!(
        mode = %settings.api_mode,
        "Starting API in {} mode",
        settings.api_mode
    );

    let state = AppState {
        settings: settings.clone(),
        scheduler: scheduler.clone(),
        openapi: Arc::new(build_document(&settings)),
    };

    let api = routes::get_routes(&settings)
        .route("/openapi.json", get(handlers::openapi))
        .with_state(state);

    let mut router = Router::new().nest(&settings.api_v1_str, api);
    let mut installed = Vec::new();
    for layer in middleware::plan(&settings) {
        installed.push(layer.name());
        router = middleware::apply(router, &layer);
    }

    tracing::debug!(
        prefix = %settings.api_v1_str,
        openapi_url = %settings.openapi_url(),
        middleware = ?installed,
        "Application assembled"
    );

    Ok(Application {
        router,
        settings,
        middleware: installed,
        lifecycle: Lifecycle::new(ShutdownHook::new(scheduler)),
    })
}
