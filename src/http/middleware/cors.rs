//! Cross-origin policy.

use axum::http::HeaderValue;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::settings::Settings;

/// Credentialed CORS policy for an explicit origin list.
///
/// Methods and headers are mirrored from the preflight request: a literal
/// `*` cannot be combined with `Access-Control-Allow-Credentials: true`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsPolicy {
    origins: Vec<String>,
}

impl CorsPolicy {
    pub fn new(origins: Vec<String>) -> Self {
        Self { origins }
    }

    /// `None` when the settings list no origins.
    pub fn from_settings(settings: &Settings) -> Option<Self> {
        settings
            .cors_enabled()
            .then(|| Self::new(settings.backend_cors_origins.clone()))
    }

    pub fn origins(&self) -> &[String] {
        &self.origins
    }

    fn allow_origin(&self) -> AllowOrigin {
        if self.origins.iter().any(|origin| origin == "*") {
            return AllowOrigin::mirror_request();
        }

        let values: Vec<HeaderValue> = self
            .origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "Invalid CORS origin; skipping");
                    None
                }
            })
            .collect();
        AllowOrigin::list(values)
    }

    pub fn layer(&self) -> CorsLayer {
        CorsLayer::new()
            .allow_origin(self.allow_origin())
            .allow_credentials(true)
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
    }
}
