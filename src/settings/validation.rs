//! Settings validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the API prefix can be mounted as a path namespace
//! - Coerce CORS origins to their serialized origin form
//! - Validate value ranges (timeouts > 0, known log levels)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function: Settings → Result<Settings, Vec<ValidationError>>
//! - Runs before settings are accepted into the application

use url::Url;

use crate::settings::schema::Settings;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single semantic problem found in the settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("project_name must not be empty")]
    EmptyProjectName,

    #[error("api_v1_str `{0}` must start with '/', must not end with '/' and must not be the root")]
    InvalidApiPrefix(String),

    #[error("CORS origin `{origin}` is invalid: {reason}")]
    InvalidOrigin { origin: String, reason: String },

    #[error("unknown log level `{0}`")]
    InvalidLogLevel(String),

    #[error("request_timeout_secs must be greater than zero")]
    ZeroRequestTimeout,
}

/// Validate the settings, returning them with CORS origins normalized.
pub fn validate_settings(mut settings: Settings) -> Result<Settings, Vec<ValidationError>> {
    let mut errors = Vec::new();

    if settings.project_name.trim().is_empty() {
        errors.push(ValidationError::EmptyProjectName);
    }

    if !is_mountable_prefix(&settings.api_v1_str) {
        errors.push(ValidationError::InvalidApiPrefix(settings.api_v1_str.clone()));
    }

    let mut origins = Vec::with_capacity(settings.backend_cors_origins.len());
    for raw in &settings.backend_cors_origins {
        if raw.trim().is_empty() {
            continue;
        }
        match normalize_origin(raw) {
            Ok(origin) => origins.push(origin),
            Err(reason) => errors.push(ValidationError::InvalidOrigin {
                origin: raw.clone(),
                reason,
            }),
        }
    }
    settings.backend_cors_origins = origins;

    settings.log_level = settings.log_level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&settings.log_level.as_str()) {
        errors.push(ValidationError::InvalidLogLevel(settings.log_level.clone()));
    }

    if settings.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if errors.is_empty() {
        Ok(settings)
    } else {
        Err(errors)
    }
}

fn is_mountable_prefix(prefix: &str) -> bool {
    prefix.len() > 1
        && prefix.starts_with('/')
        && !prefix.ends_with('/')
        && !prefix.contains(&['{', '}', '*', ' ', '?', '#'][..])
        && !prefix
            .split('/')
            .any(|segment| segment.starts_with(':') || segment.starts_with('*'))
}

/// Coerce a configured origin to the exact string browsers send in `Origin`.
///
/// `*` is passed through unchanged.
pub fn normalize_origin(raw: &str) -> Result<String, String> {
    let raw = raw.trim();
    if raw == "*" {
        return Ok(raw.to_string());
    }

    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme `{}`", url.scheme()));
    }
    if url.host_str().is_none() {
        return Err("missing host".to_string());
    }
    if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
        return Err("an origin must not carry a path, query or fragment".to_string());
    }

    Ok(url.origin().ascii_serialization())
}
