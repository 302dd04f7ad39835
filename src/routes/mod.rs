//! Versioned API routes.
//!
//! Every path here is relative to the API prefix the factory nests this
//! router under.

pub mod handlers;

use axum::{routing::get, Router};

use crate::http::app::AppState;
use crate::settings::Settings;
use self::handlers::*;

/// Assemble the v1 routes.
///
/// `/debug/settings` only exists in debug mode.
pub fn get_routes(settings: &Settings) -> Router<AppState> {
    let router = Router::new()
        .route("/health", get(health))
        .route("/jobs", get(list_jobs));

    if settings.api_mode.is_debug() {
        router.route("/debug/settings", get(debug_settings))
    } else {
        router
    }
}
