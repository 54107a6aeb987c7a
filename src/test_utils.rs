//! Shared test utilities.
//!
//! Helpers for setting up an in-memory ledger database and building test entities
//! with sensible defaults.

use crate::{
    core::{archive::ArchiveWriter, ledger::NewOrder},
    errors::Result,
};
use sea_orm::DatabaseConnection;
use tempfile::TempDir;

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Sets up a database plus an archive inside a fresh temp directory.
///
/// Keep the returned `TempDir` alive for the duration of the test; dropping it
/// deletes the archive.
pub async fn setup_ledger() -> Result<(DatabaseConnection, ArchiveWriter, TempDir)> {
    let db = setup_test_db().await?;
    let dir = tempfile::tempdir()?;
    let archive = ArchiveWriter::new(dir.path().join("archive.jsonl"));
    Ok((db, archive, dir))
}

/// Builds an order with the given id and total.
#[must_use]
pub fn test_order(order_id: &str, total_cents: i64) -> NewOrder {
    NewOrder {
        order_id: order_id.to_string(),
        total_cents,
    }
}
