//! Configuration for skyline-keys
//!
//! Settings are layered, later sources win:
//! - built-in defaults
//! - config file (`--config`, else `skyline-keys.toml` if present)
//! - environment variables (`SKYLINE_KEYS__STORE__KEYS_DIR`, ...)

use crate::domain::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file name looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "skyline-keys.toml";

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "SKYLINE_KEYS";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    pub store: StoreConfig,
    pub logging: LoggingConfig,
}

/// Key store locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Private directory holding installed key files
    pub keys_dir: PathBuf,

    /// Directory of bundled fallback key files
    pub bundled_dir: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            keys_dir: PathBuf::from("./data/keys"),
            bundled_dir: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from defaults, an optional file and the environment
    pub fn load(config_path: Option<&Path>) -> DomainResult<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?);

        builder = match config_path {
            Some(path) => builder.add_source(config::File::from(path).required(true)),
            None => builder.add_source(config::File::from(Path::new(DEFAULT_CONFIG_FILE)).required(false)),
        };

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings: Settings = builder.build()?.try_deserialize()?;
        Ok(settings)
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.store.keys_dir.as_os_str().is_empty() {
            return Err(DomainError::Config("store.keys_dir must not be empty".to_string()));
        }

        if let Some(dir) = &self.store.bundled_dir {
            if dir.as_os_str().is_empty() {
                return Err(DomainError::Config("store.bundled_dir must not be empty".to_string()));
            }
        }

        let level = self.logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(DomainError::Config(format!(
                "Unknown log level: {}",
                self.logging.level
            )));
        }

        Ok(())
    }
}
