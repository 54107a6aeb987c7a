//! Entity module - SeaORM entity definitions for the ledger database.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod daily_summary;
pub mod transaction_log;

// Re-export specific types to avoid conflicts
pub use daily_summary::{
    Column as DailySummaryColumn, Entity as DailySummary, Model as DailySummaryModel,
};
pub use transaction_log::{
    Column as TransactionLogColumn, Entity as TransactionLog, Model as TransactionLogModel,
};
