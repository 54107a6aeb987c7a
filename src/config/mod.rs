/// Ledger database connection and table creation
pub mod database;

/// Settings from config.toml and environment overrides
pub mod settings;

pub use settings::{AppConfig, load_app_configuration};
