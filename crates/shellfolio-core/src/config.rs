//! Shellfolio configuration.
//!
//! Configuration lives in `$XDG_CONFIG_HOME/shellfolio/config.toml` unless
//! `SHELLFOLIO_CONFIG` points elsewhere. Every field has a default, so a
//! missing file is the same as an empty one.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "config.toml";
const APP_DIR: &str = "shellfolio";

/// Environment variable overriding the config file path
pub const CONFIG_ENV: &str = "SHELLFOLIO_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Name shown by `whoami` and the sudo prompt
    #[serde(default = "default_user")]
    pub user: String,

    /// Prompt printed before the input line
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Where progress is stored (defaults to the XDG data dir)
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Max gap between key presses of the secret sequence; 0 disables the reset
    #[serde(default = "default_konami_idle_ms")]
    pub konami_idle_ms: u64,

    /// Password accepted after `sudo access /secret`
    #[serde(default = "default_sudo_password")]
    pub sudo_password: String,

    /// Colourise terminal output
    #[serde(default = "default_color")]
    pub color: bool,

    /// Ring the terminal bell on unlock
    #[serde(default = "default_bell")]
    pub bell: bool,
}

fn default_user() -> String {
    "guest".to_string()
}

fn default_prompt() -> String {
    "guest@portfolio:~$ ".to_string()
}

fn default_konami_idle_ms() -> u64 {
    2000
}

fn default_sudo_password() -> String {
    "hunter2".to_string()
}

fn default_color() -> bool {
    true
}

fn default_bell() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user: default_user(),
            prompt: default_prompt(),
            data_dir: None,
            konami_idle_ms: default_konami_idle_ms(),
            sudo_password: default_sudo_password(),
            color: default_color(),
            bell: default_bell(),
        }
    }
}

impl Config {
    /// Load from the default location; a missing file yields defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// `$SHELLFOLIO_CONFIG`, else `<config dir>/shellfolio/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Resolved data directory
    pub fn data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }
        dirs::data_local_dir()
            .map(|dir| dir.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from(".shellfolio"))
    }

    pub fn konami_idle_window(&self) -> Option<Duration> {
        if self.konami_idle_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.konami_idle_ms))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.konami_idle_window(), Some(Duration::from_secs(2)));
    }

    #[test]
    fn test_partial_config() {
        let config = Config::parse("user = \"neo\"\nkonami_idle_ms = 0\n").unwrap();
        assert_eq!(config.user, "neo");
        assert_eq!(config.konami_idle_window(), None);
        assert_eq!(config.sudo_password, "hunter2");
    }

    #[test]
    fn test_load_from_reports_parse_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "user = [").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_explicit_data_dir() {
        let config = Config {
            data_dir: Some(PathBuf::from("/tmp/sf")),
            ..Config::default()
        };
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/sf"));
    }
}
