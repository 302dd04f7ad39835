//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields
//!     → tower-http trace spans per request (method, uri, status, latency)
//!
//! logging.rs installs the subscriber:
//!     → EnvFilter (RUST_LOG, else settings.log_level)
//!     → fmt layer: JSON in production mode, human-readable in debug mode
//! ```

pub mod logging;

pub use logging::{init_logging, LoggingError};
