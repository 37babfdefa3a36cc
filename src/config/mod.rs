//! Configuration management for postalcode
//!
//! This module provides a layered configuration system that loads settings from:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use postalcode::config::Config;
//! use postalcode::PostalCodeManager;
//!
//! let config = Config::load().expect("Failed to load configuration");
//! let manager = PostalCodeManager::from_config(&config);
//! ```
//!
//! # Environment Variables
//!
//! Configuration can be overridden using environment variables with the pattern:
//! `POSTALCODE__<section>__<key>`
//!
//! Examples:
//! - `POSTALCODE__LOGGING__LEVEL=debug`
//! - `POSTALCODE__LOGGING__FORMAT=json`
//! - `POSTALCODE__HANDLERS__ZZ__BUILTIN=GB`
//!
//! # Configuration File
//!
//! By default, the configuration is loaded from `config/postalcode.toml`.
//! This can be overridden using the `POSTALCODE_CONFIG` environment variable.

mod models;
mod sources;
mod validation;

pub use models::{Config, HandlerConfig, LogFormat, LoggingConfig};
pub use validation::ValidationError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),

    #[error("Failed to render configuration: {0}")]
    RenderError(#[from] toml::ser::Error),
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file is malformed or
    /// validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        let config = sources::load()?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: std::path::PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_from_sources(path)?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Path `load` reads from
    pub fn default_path() -> std::path::PathBuf {
        sources::default_path()
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
