//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod api;
pub mod import;
pub mod logging;

use serde::{Deserialize, Serialize};

use self::api::ApiConfig;
use self::import::ImportConfig;
use self::logging::LoggingConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Remote API settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Spreadsheet import settings.
    #[serde(default)]
    pub import: ImportConfig,
}

impl AppConfig {
    /// Load configuration from a single TOML file plus environment
    /// variables prefixed with `ITAM__`.
    ///
    /// A missing file is not an error; every section has defaults.
    pub fn load(path: &str) -> Result<Self, AppError> {
        Self::from_builder(
            config::Config::builder().add_source(config::File::with_name(path).required(false)),
        )
    }

    /// Load `config/default.toml`, then the `config/{env}.toml` overlay,
    /// then environment variables.
    pub fn load_env(env: &str) -> Result<Self, AppError> {
        Self::from_builder(
            config::Config::builder()
                .add_source(config::File::with_name("config/default").required(false))
                .add_source(config::File::with_name(&format!("config/{env}")).required(false)),
        )
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, AppError> {
        let config = builder
            .add_source(
                config::Environment::with_prefix("ITAM")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = AppConfig::load("config/does-not-exist").expect("defaults");
        assert_eq!(config.api.api_prefix, "itam_api");
        assert_eq!(config.logging.level, "info");
        assert!(config.import.excel_serial_dates);
    }
}
