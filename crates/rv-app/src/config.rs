//! Application configuration
//!
//! Read from an optional TOML file named by the first command-line argument
//! or the `RETROVICE_CONFIG` environment variable. Missing keys fall back to
//! their defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming the configuration file
pub const CONFIG_ENV: &str = "RETROVICE_CONFIG";

/// Widest canvas accepted, in pixels
pub const MAX_WIDTH: u32 = 16384;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Control bar width in pixels
    pub width: u32,
    /// Log filter used when `RUST_LOG` is unset
    pub log_filter: String,
    /// Address shown at startup
    pub start_url: String,
    /// Initial quality level
    pub quality: i32,
    /// Where to write a PNG of the last frame on shutdown
    pub snapshot: Option<PathBuf>,
    /// Request shutdown as soon as the server is up
    pub auto_shutdown: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: 800,
            log_filter: "info".to_string(),
            start_url: "about:blank".to_string(),
            quality: 10,
            snapshot: None,
            auto_shutdown: false,
        }
    }
}

impl AppConfig {
    /// Load from the file named on the command line or in the environment,
    /// or use the defaults when neither is given.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::args_os()
            .nth(1)
            .or_else(|| std::env::var_os(CONFIG_ENV))
            .map(PathBuf::from);

        match path {
            Some(path) => Self::from_toml_file(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.width > MAX_WIDTH {
            return Err(ConfigError::InvalidWidth(self.width));
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid width {0}, expected 1..={max}", max = MAX_WIDTH)]
    InvalidWidth(u32),
}
