//! Core logic - framework-agnostic pieces the Discord layer builds on.
//!
//! Nothing in here knows about Discord. The API client returns classified outcomes,
//! the ledger works on a database connection and an archive path.

/// Core API client and its wire contracts
pub mod api;
/// Append-only JSON-lines archive
pub mod archive;
/// Transaction tracking: order ledger and daily reconciliation
pub mod ledger;
/// Prices in cents and the platform fee split
pub mod money;
/// Background scheduling of the daily batch
pub mod schedule;
