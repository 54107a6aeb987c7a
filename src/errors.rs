//! Unified error type for the bot, the Core API client and the ledger.

use thiserror::Error;

/// Every fallible operation in the crate returns this error.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read, parsed or validated
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// A required environment variable is missing or not unicode
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Ledger database failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// The Core API could not be reached (connect error, timeout, TLS)
    #[error("Core API request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The Core API answered with a success status but an unusable body
    #[error("Malformed Core API response: {message}")]
    MalformedResponse {
        /// What was missing or wrong
        message: String,
    },

    /// A money amount could not be parsed or is out of range
    #[error("Invalid amount: {input}")]
    InvalidAmount {
        /// The rejected input, as the user typed it
        input: String,
    },

    /// User-supplied input failed validation
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Human readable reason
        message: String,
    },

    /// The order has already been written to the ledger
    #[error("Order {order_id} has already been recorded")]
    DuplicateOrder {
        /// Offending order id
        order_id: String,
    },

    /// Archive file I/O
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding of archive records
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbling up from serenity / poise
    #[error("Serenity/Poise framework error: {0}")]
    #[allow(clippy::enum_variant_names)]
    FrameworkError(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::FrameworkError(Box::new(value))
    }
}

impl Error {
    /// True when the Core API was unreachable rather than answering with an error status.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
