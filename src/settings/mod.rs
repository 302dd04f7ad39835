//! Settings subsystem.
//!
//! # Data Flow
//! ```text
//! built-in defaults
//!     → settings.toml (optional, working directory)
//!     → APP__* environment variables
//!     → loader.rs (merge & deserialize)
//!     → validation.rs (semantic checks, origin normalization)
//!     → Settings (validated, immutable)
//!     → shared via Arc with the application and its handlers
//! ```
//!
//! # Design Decisions
//! - Settings are immutable once loaded; there is no reload path
//! - `project_name` is the only field without a default
//! - Validation reports every problem, not just the first

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{SettingsError, SettingsLoader, ENV_PREFIX};
pub use schema::{ApiMode, Settings};
pub use validation::ValidationError;
