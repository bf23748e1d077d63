use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Environment variable that overrides the stored API key.
pub const API_KEY_ENV: &str = "KOMET_API_KEY";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Override for the completions endpoint base URL. Unset in normal use.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl Config {
    pub fn get_path() -> Result<PathBuf> {
        let mut path = dirs::config_dir().context("Could not determine config directory")?;
        path.push("komet");
        // Ensure directory exists
        if !path.exists() {
            fs::create_dir_all(&path).context("Failed to create config directory")?;
        }
        path.push("config.json");
        Ok(path)
    }

    pub fn load() -> Result<Option<Self>> {
        let path = Self::get_path()?;
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Config =
            serde_json::from_str(&content).context("Failed to parse config file")?;

        Ok(Some(config))
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::get_path()?;
        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Resolve the effective configuration at startup. The environment
    /// variable wins over the config file; a missing credential is fatal.
    pub fn resolve() -> Result<Self> {
        let stored = Self::load()?;

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                let mut config = stored.unwrap_or_else(|| Config {
                    api_key: String::new(),
                    model: default_model(),
                    api_base: None,
                });
                config.api_key = key;
                return Ok(config);
            }
        }

        match stored {
            Some(config) if !config.api_key.trim().is_empty() => Ok(config),
            _ => bail!(
                "No API key found. Set the {} environment variable or run `komet setup`.",
                API_KEY_ENV
            ),
        }
    }
}
