//! Daily summary entity - the committed result of one reconciliation run.
//!
//! Stored in `daily_sales_summary`, one row per business date. Re-running the
//! batch for a date overwrites its row.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Daily summary database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "daily_sales_summary")]
pub struct Model {
    /// The reconciled day (UTC)
    #[sea_orm(primary_key, auto_increment = false)]
    pub business_date: Date,
    /// Gross sales
    pub sales_cents: i64,
    /// Platform fees collected
    pub fees_cents: i64,
    /// Seller revenue (`sales_cents - fees_cents`)
    pub revenue_cents: i64,
    /// Number of log entries aggregated
    pub transaction_count: i64,
    /// When this summary was written
    pub committed_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
