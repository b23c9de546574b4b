//! Client configuration.
//!
//! Read from `$TEAMCTL_HOME/config.toml` (default `~/.teamctl/config.toml`)
//! and layered file → environment:
//!
//! ```toml
//! [server]
//! api_url = "http://localhost:5000"
//! submit_url = "http://localhost:3001"
//! ```
//!
//! `TEAMCTL_API_URL` and `TEAMCTL_SUBMIT_URL` override the file. The
//! submission service historically lives on its own port, hence the second
//! base URL.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable overriding `[server] api_url`.
pub const API_URL_ENV: &str = "TEAMCTL_API_URL";

/// Environment variable overriding `[server] submit_url`.
pub const SUBMIT_URL_ENV: &str = "TEAMCTL_SUBMIT_URL";

const CONFIG_FILE: &str = "config.toml";

/// Server endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL for auth, project, and issue endpoints.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Base URL for the submission endpoints.
    #[serde(default = "default_submit_url")]
    pub submit_url: String,
}

fn default_api_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_submit_url() -> String {
    "http://localhost:3001".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            submit_url: default_submit_url(),
        }
    }
}

/// Top-level configuration file shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub server: ServerConfig,
}

impl ClientConfig {
    /// Load from the state directory, then apply environment overrides.
    /// A missing file means defaults.
    pub fn load(state_dir: &Path) -> Result<Self> {
        let path = config_path(state_dir);
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file at {}", path.display()))?
        } else {
            Self::default()
        };
        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.is_empty() {
                self.server.api_url = url;
            }
        }
        if let Ok(url) = std::env::var(SUBMIT_URL_ENV) {
            if !url.is_empty() {
                self.server.submit_url = url;
            }
        }
    }

    /// Write a default config file. Fails if one already exists.
    pub fn write_default(state_dir: &Path) -> Result<PathBuf> {
        let path = config_path(state_dir);
        anyhow::ensure!(
            !path.exists(),
            "Config file already exists at {}",
            path.display()
        );
        std::fs::create_dir_all(state_dir)
            .with_context(|| format!("Failed to create directory: {}", state_dir.display()))?;
        let content =
            toml::to_string_pretty(&Self::default()).context("Failed to serialize config")?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write config file at {}", path.display()))?;
        Ok(path)
    }
}

/// Path of the config file inside the state directory.
pub fn config_path(state_dir: &Path) -> PathBuf {
    state_dir.join(CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_localhost() {
        let config = ClientConfig::default();
        assert_eq!(config.server.api_url, "http://localhost:5000");
        assert_eq!(config.server.submit_url, "http://localhost:3001");
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig::load(dir.path()).unwrap();
        assert_eq!(config.server.api_url, default_api_url());
    }

    #[test]
    fn file_values_are_read() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            config_path(dir.path()),
            "[server]\napi_url = \"https://tracker.example.com\"\n",
        )
        .unwrap();
        let config = ClientConfig::load(dir.path()).unwrap();
        assert_eq!(config.server.api_url, "https://tracker.example.com");
        // Unspecified key falls back to its default.
        assert_eq!(config.server.submit_url, default_submit_url());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(config_path(dir.path()), "[server\napi_url = oops").unwrap();
        assert!(ClientConfig::load(dir.path()).is_err());
    }

    #[test]
    fn write_default_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = ClientConfig::write_default(dir.path()).unwrap();
        assert!(path.exists());
        assert!(ClientConfig::write_default(dir.path()).is_err());
    }
}
