//! Configuration management for tplserve
//!
//! This module provides a layered configuration system that loads settings from:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use tplserve::config::Config;
//!
//! let config = Config::load().expect("Failed to load configuration");
//! println!("Serving {} from {}", config.site.name, config.site.docroot.display());
//! ```
//!
//! # Environment Variables
//!
//! Configuration can be overridden using environment variables with the pattern:
//! `TPLSERVE__<section>__<key>`
//!
//! Examples:
//! - `TPLSERVE__SERVER__BIND_ADDR=0.0.0.0:9000`
//! - `TPLSERVE__SITE__DOCROOT=/srv/www`
//! - `TPLSERVE__MIDDLEWARE__ENABLED=access_log,hidden_paths`
//!
//! # Configuration File
//!
//! By default, the configuration is loaded from `config/tplserve.toml`.
//! This can be overridden using the `TPLSERVE_CONFIG` environment variable.

mod models;
mod settings;
mod sources;
mod validation;

pub use models::{Config, MiddlewareConfig, ServerConfig, SiteConfig, ViewConfig};
pub use settings::RequestSettings;
pub use validation::ValidationError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables (`TPLSERVE__*`)
    /// 2. TOML file (default: `config/tplserve.toml`)
    /// 3. Default values
    pub fn load() -> Result<Self, ConfigError> {
        let config = sources::load()?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path
    ///
    /// Useful for testing with custom configuration files.
    pub fn load_from_path(path: std::path::PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_from_sources(path)?;
        validation::validate(&config)?;
        Ok(config)
    }
}
