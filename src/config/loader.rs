// src/config/loader.rs
//! Layered configuration loading
//!
//! Sources are merged in order: built-in defaults, TOML files, then
//! environment variables such as `ADC_SYNC__SAMPLE_RATE_HZ=2000`. The merged
//! result is validated before it is handed out.

use crate::config::constants::paths;
use crate::config::ControllerConfig;
use config::{Config, Environment, File, FileFormat};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Configuration load error: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Configuration parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration for '{field}': {reason}")]
    Invalid { field: String, reason: String },
}

impl ConfigError {
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Loads a [`ControllerConfig`] from files and the environment
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_paths: Vec<PathBuf>,
    required: bool,
    env_prefix: Option<String>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Loader reading the optional default file and the environment
    pub fn new() -> Self {
        Self {
            config_paths: vec![PathBuf::from(paths::DEFAULT_CONFIG_FILE)],
            required: false,
            env_prefix: Some(paths::ENV_PREFIX.to_string()),
        }
    }

    /// Loader with custom paths. Every listed file must exist.
    pub fn with_paths(paths: Vec<PathBuf>) -> Self {
        Self {
            config_paths: paths,
            required: true,
            env_prefix: Some(paths::ENV_PREFIX.to_string()),
        }
    }

    /// Change or disable the environment prefix
    pub fn env_prefix(mut self, prefix: Option<&str>) -> Self {
        self.env_prefix = prefix.map(str::to_string);
        self
    }

    /// Merge all sources and validate the result
    pub fn load(&self) -> Result<ControllerConfig, ConfigError> {
        let mut builder = Config::builder();

        for path in &self.config_paths {
            if self.required && !path.exists() {
                return Err(ConfigError::FileNotFound(path.display().to_string()));
            }
            debug!(path = %path.display(), "adding configuration file");
            builder = builder.add_source(
                File::from(path.as_path())
                    .format(FileFormat::Toml)
                    .required(self.required),
            );
        }

        if let Some(prefix) = &self.env_prefix {
            builder = builder.add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator(paths::ENV_SEPARATOR)
                    .separator(paths::ENV_SEPARATOR)
                    .try_parsing(true),
            );
        }

        let config: ControllerConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a single TOML document
    pub fn from_toml_str(content: &str) -> Result<ControllerConfig, ConfigError> {
        let config: ControllerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a single TOML file, ignoring the environment
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<ControllerConfig, ConfigError> {
        Self::with_paths(vec![path.as_ref().to_path_buf()])
            .env_prefix(None)
            .load()
    }
}
