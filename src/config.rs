//! Runtime configuration for the state layer.
//!
//! One tunable lives here: the session expiration window. Everything else
//! about the registries is fixed behavior.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration for the chat state core.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoreConfig {
    /// Session token settings.
    #[serde(default)]
    pub session: SessionConfig,
}

impl CoreConfig {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: CoreConfig = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Session token configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Sliding expiration window in seconds (default: 600). Every
    /// successful validation restarts the window; an idle session dies
    /// after one full window.
    #[serde(default = "default_session_window_secs")]
    pub window_secs: u64,
}

impl SessionConfig {
    /// The expiration window as a [`Duration`].
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            window_secs: default_session_window_secs(),
        }
    }
}

fn default_session_window_secs() -> u64 {
    600
}
