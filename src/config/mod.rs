//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the `DESKPILOT`
//! prefix and nested sections use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use deskpilot::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod classifier;
mod database;
mod error;
mod llm;
mod paths;

pub use classifier::ClassifierConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use llm::LlmConfig;
pub use paths::PathsConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// LLM backend (Ollama host, models, timeouts)
    #[serde(default)]
    pub llm: LlmConfig,

    /// Resolver cascade tuning
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Preference store database (SQLite)
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Filesystem paths
    #[serde(default)]
    pub paths: PathsConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads a `.env` file if present, then reads variables with the
    /// `DESKPILOT` prefix. Nested values use `__`:
    ///
    /// - `DESKPILOT__LLM__HOST=http://localhost:11434` -> `llm.host`
    /// - `DESKPILOT__CLASSIFIER__SIMILARITY_THRESHOLD=0.8`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("DESKPILOT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.llm.validate()?;
        self.classifier.validate()?;
        self.database.validate()?;
        Ok(())
    }
}
