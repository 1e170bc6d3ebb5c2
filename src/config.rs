/// Client configuration
///
/// Stored as JSON in the user's config directory:
/// - Linux: ~/.config/qualitea/config.json
/// - macOS: ~/Library/Application Support/qualitea/config.json
/// - Windows: %APPDATA%\qualitea\config.json
///
/// Every field is optional in the file; missing fields take their defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::error::ConfigError;

/// Where the analysis service listens unless told otherwise
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

/// Environment variable that overrides `base_url`
pub const BASE_URL_ENV: &str = "QUALITEA_BASE_URL";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Origin of the analysis service, e.g. "http://127.0.0.1:8080"
    pub base_url: String,
    /// Per-request timeout in seconds. None keeps the transport default (no timeout).
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

impl Config {
    /// Parse from a JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Get the path where the config file is expected
    pub fn path() -> Option<PathBuf> {
        let mut path = dirs::config_dir().or_else(dirs::home_dir)?;
        path.push("qualitea");
        path.push("config.json");
        Some(path)
    }

    /// Read and validate a config file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the effective configuration.
    ///
    /// Never fails: a broken file or URL is logged and replaced by defaults,
    /// since the client is still usable against the default origin.
    pub fn load() -> Self {
        let mut config = match Self::path() {
            Some(path) if path.exists() => match Self::load_from(&path) {
                Ok(config) => {
                    log::info!("⚙️  Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("⚠️  Ignoring {}: {}", path.display(), e);
                    Self::default()
                }
            },
            _ => Self::default(),
        };

        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            config.base_url = url;
        }

        if let Err(e) = config.validate() {
            log::warn!("⚠️  {}, falling back to {}", e, DEFAULT_BASE_URL);
            config.base_url = DEFAULT_BASE_URL.to_string();
        }

        config
    }

    /// Check that `base_url` is an absolute URL endpoint paths can be appended to
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            source,
        })?;

        if url.cannot_be_a_base() {
            return Err(ConfigError::NotABase(self.base_url.clone()));
        }

        Ok(())
    }

    /// The configured request timeout, if any
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_points_at_local_service() {
        let config = Config::default();
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.timeout(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = Config::from_json(r#"{ "timeout_secs": 30 }"#).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_serialization() {
        let config = Config {
            base_url: "http://analysis.local:9000".to_string(),
            timeout_secs: Some(5),
        };

        let json = serde_json::to_string_pretty(&config).unwrap();
        let restored = Config::from_json(&json).unwrap();

        assert_eq!(config, restored);
    }

    #[test]
    fn test_validate_rejects_bad_urls() {
        let relative = Config {
            base_url: "127.0.0.1:8080/predict".to_string(),
            ..Config::default()
        };
        assert!(relative.validate().is_err());

        let opaque = Config {
            base_url: "mailto:tea@example.com".to_string(),
            ..Config::default()
        };
        assert!(matches!(opaque.validate(), Err(ConfigError::NotABase(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "base_url": "http://10.0.0.2:8080" }}"#).unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.base_url, "http://10.0.0.2:8080");
        assert_eq!(config.timeout_secs, None);
    }

    #[test]
    fn test_load_from_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let result = Config::load_from(file.path());
        assert!(matches!(result, Err(ConfigError::Serialization(_))));
    }
}
