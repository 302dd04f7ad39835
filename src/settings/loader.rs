//! Settings loading from the settings file and the environment.

use std::collections::HashMap;
use std::path::PathBuf;

use ::config::{Config, Environment, File, FileFormat};

use crate::settings::schema::Settings;
use crate::settings::validation::ValidationError;

/// Prefix of every environment variable read by the loader (`APP__API_MODE`).
pub const ENV_PREFIX: &str = "APP";

const ENV_SEPARATOR: &str = "__";
const DEFAULT_FILE: &str = "settings";
const LIST_KEYS: &[&str] = &["backend_cors_origins"];

/// Error type for settings loading.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Source(#[from] ::config::ConfigError),

    #[error("invalid settings: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

enum FileSource {
    Default,
    Path(PathBuf),
    Toml(String),
}

/// Builder over the layered settings sources.
///
/// Later sources win: file values override defaults, environment values
/// override the file.
pub struct SettingsLoader {
    file: FileSource,
    env: Option<HashMap<String, String>>,
}

impl SettingsLoader {
    /// Optional `settings.toml` in the working directory plus the process environment.
    pub fn new() -> Self {
        Self {
            file: FileSource::Default,
            env: None,
        }
    }

    /// Read a required settings file instead of the optional default one.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = FileSource::Path(path.into());
        self
    }

    /// Use inline TOML content as the file layer.
    pub fn with_toml(mut self, content: impl Into<String>) -> Self {
        self.file = FileSource::Toml(content.into());
        self
    }

    /// Replace the process environment with an explicit variable map.
    pub fn with_env(mut self, vars: HashMap<String, String>) -> Self {
        self.env = Some(vars);
        self
    }

    /// Merge all sources, deserialize and validate.
    pub fn load(self) -> Result<Settings, SettingsError> {
        let mut env = Environment::with_prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR)
            .try_parsing(true)
            .list_separator(",");
        for key in LIST_KEYS {
            env = env.with_list_parse_key(key);
        }
        if let Some(vars) = self.env {
            env = env.source(Some(vars));
        }

        let builder = Config::builder();
        let builder = match self.file {
            FileSource::Default => builder.add_source(File::with_name(DEFAULT_FILE).required(false)),
            FileSource::Path(path) => builder.add_source(File::from(path).required(true)),
            FileSource::Toml(content) => {
                builder.add_source(File::from_str(&content, FileFormat::Toml))
            }
        };

        let settings: Settings = builder
            .add_source(env)
            .build()?
            .try_deserialize()?;

        settings.validated()
    }
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self::new()
    }
}
