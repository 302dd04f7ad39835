//! Settings schema definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::settings::loader::{SettingsError, SettingsLoader};
use crate::settings::validation::validate_settings;

/// Runtime configuration for the API process.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Settings {
    /// Human-readable project name, used as the schema document title.
    pub project_name: String,

    /// Path namespace for every versioned route (e.g. `/api/v1`).
    #[serde(default = "default_api_v1_str")]
    pub api_v1_str: String,

    /// Origins allowed to make credentialed cross-origin requests.
    #[serde(default)]
    pub backend_cors_origins: Vec<String>,

    #[serde(default)]
    pub api_mode: ApiMode,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Upper bound on the time a single request may take.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_v1_str() -> String {
    "/api/v1".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Settings {
    /// Settings with the given project name and every other field defaulted.
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            api_v1_str: default_api_v1_str(),
            backend_cors_origins: Vec::new(),
            api_mode: ApiMode::default(),
            log_level: default_log_level(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }

    /// Load settings from `settings.toml` and the process environment.
    pub fn load() -> Result<Self, SettingsError> {
        SettingsLoader::new().load()
    }

    /// Validate these settings, returning them with origins normalized.
    pub fn validated(self) -> Result<Self, SettingsError> {
        validate_settings(self).map_err(SettingsError::Validation)
    }

    /// Path of the machine-readable schema document.
    pub fn openapi_url(&self) -> String {
        format!("{}/openapi.json", self.api_v1_str)
    }

    pub fn cors_enabled(&self) -> bool {
        !self.backend_cors_origins.is_empty()
    }
}

/// Operating mode of the API.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ApiMode {
    #[default]
    Debug,
    Production,
}

impl ApiMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiMode::Debug => "debug",
            ApiMode::Production => "production",
        }
    }

    pub fn is_debug(&self) -> bool {
        matches!(self, ApiMode::Debug)
    }
}

impl fmt::Display for ApiMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_url_is_under_prefix() {
        let mut settings = Settings::new("demo");
        assert_eq!(settings.openapi_url(), "/api/v1/openapi.json");

        settings.api_v1_str = "/internal/v2".into();
        assert_eq!(settings.openapi_url(), "/internal/v2/openapi.json");
    }

    #[test]
    fn new_uses_defaults() {
        let settings = Settings::new("demo");
        assert_eq!(settings.api_mode, ApiMode::Debug);
        assert!(!settings.cors_enabled());
        assert_eq!(settings.request_timeout_secs, 30);
    }
}
