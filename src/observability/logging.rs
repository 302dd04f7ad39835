//! Structured logging.
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - JSON format for production, pretty format for development
//! - Log level configurable via settings and `RUST_LOG`

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::settings::Settings;

#[derive(Debug, thiserror::Error)]
#[error("failed to install the tracing subscriber: {0}")]
pub struct LoggingError(#[from] tracing_subscriber::util::TryInitError);

/// Default filter directive when `RUST_LOG` is not set.
pub fn default_directive(settings: &Settings) -> String {
    format!(
        "scheduler_api={level},tower_http={level}",
        level = settings.log_level
    )
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(settings: &Settings) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(settings)));
    let json = !settings.api_mode.is_debug();

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| fmt::layer().json()))
        .with((!json).then(|| fmt::layer()))
        .try_init()?;

    Ok(())
}
