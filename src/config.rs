//! Configuration file handling.
//!
//! An optional TOML file under the platform config directory
//! (`calcboard/config.toml`). Every field has a default; CLI flags override
//! whatever the file provides.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub pages: PagesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind, e.g. "127.0.0.1" or "0.0.0.0".
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PagesConfig {
    /// Serve the dashboard page variant at /dashboard.
    pub dashboard: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self { dashboard: true }
    }
}

impl Config {
    /// The default config file location, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("calcboard").join("config.toml"))
    }

    /// Load from the default location. A missing file yields the defaults.
    pub fn load() -> anyhow::Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load from an explicit path. The file must exist and parse.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.bind, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert!(config.pages.dashboard);
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let config: Config = toml::from_str("[server]\nport = 8080\n").expect("parses");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.bind, "127.0.0.1");
        assert!(config.pages.dashboard);
    }

    #[test]
    fn test_full_file() {
        let config: Config = toml::from_str(
            "[server]\nbind = \"0.0.0.0\"\nport = 9000\n\n[pages]\ndashboard = false\n",
        )
        .expect("parses");
        assert_eq!(config.server.bind, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert!(!config.pages.dashboard);
    }
}
