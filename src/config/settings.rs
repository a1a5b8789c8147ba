use crate::error::{LedgerError, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::env;
use std::path::Path;

/// Defaults plus environment overrides; an invalid environment is ignored
/// as a whole and the defaults are used instead.
pub static GLOBAL_CONFIG: Lazy<Config> = Lazy::new(|| {
    Config::from_env().unwrap_or_else(|e| {
        log::warn!("Ignoring invalid environment configuration: {e}");
        Config::default()
    })
});

const DEFAULT_MEMPOOL_MAX_SIZE: usize = 1000;
const DEFAULT_BLOCK_VERSION: u32 = 1;
static DEFAULT_LOG_LEVEL: &str = "info";

const MEMPOOL_MAX_SIZE_KEY: &str = "LEDGER_MEMPOOL_MAX_SIZE";
const BLOCK_VERSION_KEY: &str = "LEDGER_BLOCK_VERSION";
const LOG_LEVEL_KEY: &str = "LEDGER_LOG_LEVEL";

/// Ledger settings. Every field is optional in TOML and falls back to its
/// default; environment variables override both.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Capacity of the mempool's history map
    pub mempool_max_size: usize,
    /// Version stamped into produced headers
    pub block_version: u32,
    /// `env_logger` filter, e.g. "info" or "ledger_core=debug"
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            mempool_max_size: DEFAULT_MEMPOOL_MAX_SIZE,
            block_version: DEFAULT_BLOCK_VERSION,
            log_level: String::from(DEFAULT_LOG_LEVEL),
        }
    }
}

impl Config {
    pub fn from_toml_str(contents: &str) -> Result<Config> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a TOML file, then applies environment overrides
    pub fn load(path: &Path) -> Result<Config> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&contents)?;
        config.apply_env()?;
        Ok(config)
    }

    /// Defaults plus environment overrides
    pub fn from_env() -> Result<Config> {
        let mut config = Config::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Applies `LEDGER_*` overrides. All or nothing: on error `self` is unchanged.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut updated = self.clone();
        if let Some(value) = lookup(MEMPOOL_MAX_SIZE_KEY) {
            updated.mempool_max_size = parse_var(MEMPOOL_MAX_SIZE_KEY, &value)?;
        }
        if let Some(value) = lookup(BLOCK_VERSION_KEY) {
            updated.block_version = parse_var(BLOCK_VERSION_KEY, &value)?;
        }
        if let Some(value) = lookup(LOG_LEVEL_KEY) {
            updated.log_level = value;
        }
        updated.validate()?;

        *self = updated;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.mempool_max_size == 0 {
            return Err(LedgerError::Config(
                "mempool_max_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| LedgerError::Config(format!("Invalid value for {key}: {value}")))
}
