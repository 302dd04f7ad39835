//! Scheduler API Library
//!
//! Composes the HTTP application: settings, CORS policy, versioned routes
//! and the lifecycle hooks that close the background job scheduler.

pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routes;
pub mod scheduler;
pub mod settings;

pub use http::{create_app, create_app_with_scheduler, serve, AppState, Application, ServeError};
pub use lifecycle::Lifecycle;
pub use scheduler::{get_scheduler, JobScheduler, Scheduler};
pub use settings::Settings;
