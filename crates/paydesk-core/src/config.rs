//! Configuration management for paydesk.
//!
//! Loads configuration from ${PAYDESK_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable that overrides the configured backend base URL.
const BASE_URL_ENV: &str = "PAYDESK_BASE_URL";

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for paydesk configuration and session data.
    //!
    //! PAYDESK_HOME resolution order:
    //! 1. PAYDESK_HOME environment variable (if set)
    //! 2. ~/.config/paydesk (default)

    use std::path::PathBuf;

    /// Returns the paydesk home directory.
    ///
    /// Checks PAYDESK_HOME env var first, falls back to ~/.config/paydesk
    pub fn paydesk_home() -> PathBuf {
        if let Ok(home) = std::env::var("PAYDESK_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("paydesk"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        paydesk_home().join("config.toml")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend base URL (overridden by PAYDESK_BASE_URL).
    pub base_url: Option<String>,
}

impl Config {
    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Resolves the backend base URL with precedence: env > config.
    ///
    /// The URL is validated and returned without a trailing slash so paths
    /// can be appended directly.
    ///
    /// # Errors
    /// Returns an error if no URL is configured or the value is malformed.
    pub fn resolve_base_url(&self) -> Result<String> {
        let raw = match std::env::var(BASE_URL_ENV) {
            Ok(env_url) if !env_url.trim().is_empty() => env_url,
            _ => self
                .base_url
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .with_context(|| {
                    format!(
                        "No backend base URL configured. Set {BASE_URL_ENV} or base_url in config.toml."
                    )
                })?,
        };

        let trimmed = raw.trim().trim_end_matches('/').to_string();
        url::Url::parse(&trimmed)
            .with_context(|| format!("Invalid backend base URL: {trimmed}"))?;
        Ok(trimmed)
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename) to prevent corruption.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    /// Config loading: missing file returns defaults.
    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.base_url, None);
    }

    /// Config loading: base_url parsed from file.
    #[test]
    fn test_load_base_url_from_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(
            &config_path,
            "base_url = \"https://portal.example.com\"\n",
        )
        .unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(
            config.base_url.as_deref(),
            Some("https://portal.example.com")
        );
    }

    /// Config init: creates file with template, creates parent dirs.
    #[test]
    fn test_init_creates_config_with_template() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("subdir").join("config.toml");

        Config::init(&config_path).unwrap();

        assert!(config_path.exists());
        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("# base_url ="));
    }

    /// Config init: fails if file exists (no silent overwrite).
    #[test]
    fn test_init_fails_if_exists() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "").unwrap();

        let result = Config::init(&config_path);
        assert!(result.is_err());
    }

    /// Base URL resolution: config value with trailing slash is normalized.
    #[test]
    fn test_resolve_base_url_trims_trailing_slash() {
        let config = Config {
            base_url: Some("https://portal.example.com/".to_string()),
        };
        assert_eq!(
            config.resolve_base_url().unwrap(),
            "https://portal.example.com"
        );
    }

    /// Base URL resolution: nothing configured is an error.
    #[test]
    fn test_resolve_base_url_missing_errors() {
        let config = Config::default();
        if std::env::var("PAYDESK_BASE_URL").is_ok() {
            return; // ambient env would mask the failure
        }
        assert!(config.resolve_base_url().is_err());
    }

    /// Base URL resolution: malformed URLs are rejected.
    #[test]
    fn test_resolve_base_url_invalid() {
        let config = Config {
            base_url: Some("not a url".to_string()),
        };
        if std::env::var("PAYDESK_BASE_URL").is_ok() {
            return;
        }
        assert!(config.resolve_base_url().is_err());
    }
}
