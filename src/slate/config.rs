//! # Configuration
//!
//! Stored as `config.json` next to the ledger data. A missing file means defaults.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `currency-symbol` | `$` | Prefix used when displaying amounts |
//! | `placeholder` | `Custom amount` | Description for transactions with no text and no product |

use crate::error::{Result, SlateError};
use crate::model::DEFAULT_PLACEHOLDER;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_CURRENCY_SYMBOL: &str = "$";

pub const KEYS: [&str; 2] = ["currency-symbol", "placeholder"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlateConfig {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    #[serde(default = "default_placeholder")]
    pub placeholder_description: String,
}

fn default_currency_symbol() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

fn default_placeholder() -> String {
    DEFAULT_PLACEHOLDER.to_string()
}

impl Default for SlateConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            placeholder_description: default_placeholder(),
        }
    }
}

impl SlateConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: SlateConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<&str> {
        match key {
            "currency-symbol" => Ok(&self.currency_symbol),
            "placeholder" => Ok(&self.placeholder_description),
            other => Err(unknown_key(other)),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        if value.is_empty() {
            return Err(SlateError::Config(format!("{} cannot be empty", key)));
        }
        match key {
            "currency-symbol" => self.currency_symbol = value.to_string(),
            "placeholder" => self.placeholder_description = value.to_string(),
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> SlateError {
    SlateError::Config(format!(
        "Unknown config key: {} (expected one of: {})",
        key,
        KEYS.join(", ")
    ))
}
