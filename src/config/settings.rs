//! Application settings loaded from `config.toml` and the environment.
//!
//! Every field has a default so the bot starts with nothing but a
//! `DISCORD_BOT_TOKEN`. Values from the environment (usually via `.env`)
//! override whatever the TOML file says.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where and how to reach the Core API
    pub core_api: CoreApiConfig,
    /// Discord-side ids (guild, channels, roles)
    pub discord: DiscordConfig,
    /// Platform fee split used by the ledger
    pub fees: FeeConfig,
    /// End-of-day batch settings
    pub reconciliation: ReconciliationConfig,
}

/// Core API connection settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CoreApiConfig {
    /// Base URL, e.g. `http://localhost:8080`
    pub base_url: String,
    /// Shared secret for the `/api/internal` routes
    pub internal_key: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for CoreApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            internal_key: None,
            timeout_secs: 10,
        }
    }
}

/// Discord ids. All optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DiscordConfig {
    /// Register commands in this guild only (instant updates during development)
    pub dev_guild_id: Option<u64>,
    /// Channel new drops are posted to; falls back to the invoking channel
    pub marketplace_channel_id: Option<u64>,
    /// Role required for seller commands; no check when unset
    pub seller_role_id: Option<u64>,
}

/// Fee split configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeeConfig {
    /// Fraction of each sale kept by the platform (0.0 - 1.0)
    pub platform_share: f64,
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            platform_share: 0.10,
        }
    }
}

/// Ledger and daily batch settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReconciliationConfig {
    /// Run the daily batch in the background
    pub enabled: bool,
    /// UTC hour the batch runs at
    pub run_at_hour_utc: u32,
    /// JSON-lines archive of every transaction log entry
    pub archive_path: PathBuf,
}

impl Default for ReconciliationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            run_at_hour_utc: 0,
            archive_path: PathBuf::from("data/transaction_archive.jsonl"),
        }
    }
}

impl AppConfig {
    /// Applies environment overrides.
    ///
    /// `lookup` returns the value of a variable if set; production passes
    /// `std::env::var`, tests pass a map.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("CORE_API_URL") {
            self.core_api.base_url = url;
        }
        if let Some(key) = lookup("CORE_API_INTERNAL_KEY") {
            self.core_api.internal_key = Some(key);
        }
        if let Some(id) = lookup("DEV_GUILD_ID") {
            self.discord.dev_guild_id = Some(parse_id("DEV_GUILD_ID", &id)?);
        }
        if let Some(id) = lookup("MARKETPLACE_CHANNEL_ID") {
            self.discord.marketplace_channel_id = Some(parse_id("MARKETPLACE_CHANNEL_ID", &id)?);
        }
        if let Some(id) = lookup("SELLER_ROLE_ID") {
            self.discord.seller_role_id = Some(parse_id("SELLER_ROLE_ID", &id)?);
        }
        Ok(())
    }

    /// Rejects values that would only fail later at runtime.
    pub fn validate(&self) -> Result<()> {
        if self.core_api.base_url.trim().is_empty() {
            return Err(Error::Config {
                message: "core_api.base_url must not be empty".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.fees.platform_share) {
            return Err(Error::Config {
                message: format!(
                    "fees.platform_share must be between 0 and 1, got {}",
                    self.fees.platform_share
                ),
            });
        }
        if self.reconciliation.run_at_hour_utc > 23 {
            return Err(Error::Config {
                message: format!(
                    "reconciliation.run_at_hour_utc must be 0-23, got {}",
                    self.reconciliation.run_at_hour_utc
                ),
            });
        }
        Ok(())
    }
}

fn parse_id(key: &str, value: &str) -> Result<u64> {
    value.trim().parse().map_err(|e| Error::Config {
        message: format!("{key} is not a valid Discord id ({value:?}): {e}"),
    })
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path_ref:?}: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config file {path_ref:?}: {e}"),
    })
}

/// Loads `./config.toml` when present, applies environment overrides and validates.
pub fn load_app_configuration() -> Result<AppConfig> {
    let path = Path::new("config.toml");
    let mut config = if path.exists() {
        load_config(path)?
    } else {
        tracing::info!("No config.toml found, using defaults");
        AppConfig::default()
    };

    config.apply_overrides(|key| std::env::var(key).ok())?;
    config.validate()?;

    tracing::info!(
        core_api = %config.core_api.base_url,
        reconciliation = config.reconciliation.enabled,
        "Configuration loaded"
    );
    Ok(config)
}
