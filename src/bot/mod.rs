//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for the C500 marketplace:
//! slash commands, the buy button and drop modal handlers, brand embeds, and the
//! shared state every command reads from.

/// Command checks (verified seller)
pub mod checks;
/// Discord command implementations (seller, fulfill, general, admin, ledger)
pub mod commands;
/// Brand embeds
pub mod embeds;
/// Framework setup, error handling and gateway events
pub mod framework;
/// Discord interaction handlers (buy button, drop modal)
pub mod handlers;
/// User-facing reply text
pub mod responses;

use crate::{
    config::AppConfig,
    core::{api::CoreApiClient, archive::ArchiveWriter, money::FeeSchedule},
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;
use std::{sync::Arc, time::Instant};

/// Poise context used by every command.
pub type Context<'a> = poise::Context<'a, BotData, Error>;

/// Shared data available to all bot commands.
/// This structure holds the Core API client, the ledger database and archive,
/// and the loaded configuration.
pub struct BotData {
    /// Loaded application configuration
    pub config: Arc<AppConfig>,
    /// The one HTTP client talking to the Core API
    pub api: CoreApiClient,
    /// Ledger database
    pub database: DatabaseConnection,
    /// JSON-lines audit archive
    pub archive: ArchiveWriter,
    /// Platform fee split
    pub fees: FeeSchedule,
    /// When the bot started, for `/uptime`
    pub started_at: Instant,
}

impl BotData {
    /// Builds the shared state from the configuration and an open database.
    ///
    /// # Errors
    /// Fails when the Core API URL or the fee share is invalid.
    pub fn new(config: Arc<AppConfig>, database: DatabaseConnection) -> Result<Self> {
        let api = CoreApiClient::new(&config.core_api)?;
        let fees = FeeSchedule::from_share(config.fees.platform_share)?;
        let archive = ArchiveWriter::new(config.reconciliation.archive_path.clone());

        Ok(Self {
            config,
            api,
            database,
            archive,
            fees,
            started_at: Instant::now(),
        })
    }
}

pub use framework::run_bot;
