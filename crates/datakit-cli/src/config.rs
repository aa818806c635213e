//! Command-line configuration management.
//!
//! Connection settings come from three layers, later ones winning:
//! the config file, environment variables (a `.env` file is loaded into the
//! environment at startup), and command-line flags.
//!
//! The config file is stored at `~/.config/datakit/config.json`. The API key
//! is never written to it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Application name used for the config directory path
const APP_NAME: &str = "datakit";

/// Config file name
const CONFIG_FILE: &str = "config.json";

pub const ENV_TOKEN_URL: &str = "DATAKIT_TOKEN_URL";
pub const ENV_API_URL: &str = "DATAKIT_API_URL";
pub const ENV_API_KEY: &str = "DATAKIT_API_KEY";
pub const ENV_INSTANCE_ID: &str = "DATAKIT_INSTANCE_ID";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub token_url: Option<String>,
    pub api_url: Option<String>,
    #[serde(skip_serializing, default)]
    pub api_key: Option<String>,
    pub instance_id: Option<String>,
}

/// Fully resolved settings needed to authorize.
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub token_url: String,
    pub api_url: String,
    pub api_key: String,
    pub instance_id: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Overlay values found through `lookup` (normally `std::env::var`).
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        if let Some(v) = non_empty(ENV_TOKEN_URL) {
            self.token_url = Some(v);
        }
        if let Some(v) = non_empty(ENV_API_URL) {
            self.api_url = Some(v);
        }
        if let Some(v) = non_empty(ENV_API_KEY) {
            self.api_key = Some(v);
        }
        if let Some(v) = non_empty(ENV_INSTANCE_ID) {
            self.instance_id = Some(v);
        }
    }

    /// Overlay every value that is set in `other`.
    pub fn merge(&mut self, other: Config) {
        if other.token_url.is_some() {
            self.token_url = other.token_url;
        }
        if other.api_url.is_some() {
            self.api_url = other.api_url;
        }
        if other.api_key.is_some() {
            self.api_key = other.api_key;
        }
        if other.instance_id.is_some() {
            self.instance_id = other.instance_id;
        }
    }

    pub fn credentials(&self) -> Result<Credentials> {
        fn require(value: &Option<String>, flag: &str, env: &str) -> Result<String> {
            value.clone().ok_or_else(|| {
                anyhow::anyhow!("Missing setting: pass --{} or set {}", flag, env)
            })
        }

        Ok(Credentials {
            token_url: require(&self.token_url, "token-url", ENV_TOKEN_URL)?,
            api_url: require(&self.api_url, "api-url", ENV_API_URL)?,
            api_key: require(&self.api_key, "api-key", ENV_API_KEY)?,
            instance_id: require(&self.instance_id, "instance-id", ENV_INSTANCE_ID)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn full() -> Config {
        Config {
            token_url: Some("https://iam.example.com/token".to_string()),
            api_url: Some("https://api.example.com/".to_string()),
            api_key: Some("key".to_string()),
            instance_id: Some("inst".to_string()),
        }
    }

    #[test]
    fn test_api_key_is_not_serialized() {
        let json = serde_json::to_string(&full()).unwrap();
        assert!(!json.contains("api_key"));
        assert!(json.contains("instance_id"));

        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.api_key, None);
        assert_eq!(parsed.token_url, full().token_url);
    }

    #[test]
    fn test_apply_env_overrides_file_values() {
        let env: HashMap<&str, &str> = [
            (ENV_API_URL, "https://env.example.com"),
            (ENV_API_KEY, "env-key"),
            (ENV_INSTANCE_ID, "  "),
        ]
        .into_iter()
        .collect();

        let mut config = full();
        config.apply_env(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.api_url.as_deref(), Some("https://env.example.com"));
        assert_eq!(config.api_key.as_deref(), Some("env-key"));
        // Blank values are ignored
        assert_eq!(config.instance_id.as_deref(), Some("inst"));
        assert_eq!(config.token_url.as_deref(), Some("https://iam.example.com/token"));
    }

    #[test]
    fn test_merge_only_set_values() {
        let mut config = full();
        config.merge(Config {
            instance_id: Some("flag-inst".to_string()),
            ..Config::default()
        });
        assert_eq!(config.instance_id.as_deref(), Some("flag-inst"));
        assert_eq!(config.api_key.as_deref(), Some("key"));
    }

    #[test]
    fn test_credentials() {
        let creds = full().credentials().unwrap();
        assert_eq!(creds.api_url, "https://api.example.com/");

        let mut missing = full();
        missing.api_key = None;
        let err = missing.credentials().unwrap_err();
        assert!(err.to_string().contains("--api-key"));
        assert!(err.to_string().contains(ENV_API_KEY));
    }
}
