//! Transaction log entity - one row per recorded sale.
//!
//! Rows live in the `daily_transactions` table and are keyed by the Core API's
//! `order_id`, so an order can only ever be logged once. Amounts are integer cents;
//! `platform_fee_cents + seller_share_cents` always equals `amount_cents`.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Transaction log database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "daily_transactions")]
pub struct Model {
    /// Order id assigned by the Core API
    #[sea_orm(primary_key, auto_increment = false)]
    pub order_id: String,
    /// Kind of ledger entry, currently always `"SALE"`
    pub transaction_type: String,
    /// When the entry was recorded
    pub recorded_at: DateTimeUtc,
    /// UTC calendar date the entry counts towards
    pub business_date: Date,
    /// Gross amount paid by the buyer
    pub amount_cents: i64,
    /// Platform's cut of `amount_cents`
    pub platform_fee_cents: i64,
    /// Seller's cut of `amount_cents`
    pub seller_share_cents: i64,
}

/// Log entries stand alone
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
