//! HTTP application subsystem.
//!
//! # Data Flow
//! ```text
//! Settings
//!     → app.rs (factory: state, routes, schema document)
//!     → middleware/ (declarative plan: request id, timeout, trace, CORS)
//!     → Application (router + lifecycle hooks)
//!     → server.rs (startup hooks → axum::serve → shutdown hook)
//! ```

pub mod app;
pub mod middleware;
pub mod openapi;
pub mod request;
pub mod server;

pub use app::{create_app, create_app_with_scheduler, AppState, Application};
pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use server::{bind, serve, ServeError};
