//! Configuration System
//!
//! Layered configuration: built-in defaults, then an optional TOML file,
//! then `DOSSIER_*` environment overrides.

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ApiError;
use crate::logging::LoggingConfig;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DossierConfig {
    /// Filesystem path of the embedded database.
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    /// Process-wide fallback model; closes the preference chain, so it must
    /// always be present.
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Maximum artifact content length in characters. Longer content is
    /// truncated before persisting, and the caller is told.
    #[serde(default = "default_max_content_chars")]
    pub max_content_chars: usize,

    /// Items per page in interactive listings.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Pagination session lifetime in seconds, measured from session start.
    #[serde(default = "default_session_timeout_secs")]
    pub session_timeout_secs: u64,

    /// Actors allowed to manage community-scoped state regardless of role.
    #[serde(default)]
    pub admin_allow_list: Vec<String>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_store_path() -> PathBuf {
    PathBuf::from("./data/dossier.db")
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_max_content_chars() -> usize {
    100_000
}

fn default_page_size() -> usize {
    25
}

fn default_session_timeout_secs() -> u64 {
    300
}

impl Default for DossierConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            default_model: default_model(),
            max_content_chars: default_max_content_chars(),
            page_size: default_page_size(),
            session_timeout_secs: default_session_timeout_secs(),
            admin_allow_list: Vec::new(),
            logging: LoggingConfig::default(),
        }
    }
}

impl DossierConfig {
    /// Load configuration from an optional file plus the environment.
    pub fn load(file: Option<&Path>) -> Result<Self, ApiError> {
        let mut builder = Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(File::from(path));
        }
        let loaded = builder
            .add_source(
                Environment::with_prefix("DOSSIER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        let config: DossierConfig = loaded.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        if self.max_content_chars == 0 {
            return Err(ApiError::ConfigError(
                "max_content_chars must be positive".to_string(),
            ));
        }
        if self.page_size == 0 {
            return Err(ApiError::ConfigError("page_size must be positive".to_string()));
        }
        if self.session_timeout_secs == 0 {
            return Err(ApiError::ConfigError(
                "session_timeout_secs must be positive".to_string(),
            ));
        }
        if self.default_model.trim().is_empty() {
            return Err(ApiError::ConfigError(
                "default_model must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn session_timeout(&self) -> Duration {
        Duration::from_secs(self.session_timeout_secs)
    }
}
