//! Transaction tracking - the real-time order ledger and the end-of-day batch.
//!
//! Real time: a paid order is split into platform fee and seller share, turned into a
//! `SALE` log entry, and written to the operational store and then the archive.
//!
//! End of day: the day's entries are aggregated, summarized into totals and committed
//! to the `daily_sales_summary` table that dashboards read from.

use crate::{
    core::{
        archive::ArchiveWriter,
        money::{FeeSchedule, format_cents},
    },
    entities::{DailySummary, TransactionLog, daily_summary, transaction_log},
    errors::{Error, Result},
};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{QueryOrder, Set, SqlErr, TransactionTrait, prelude::*};
use tracing::{info, instrument};

/// Ledger entry type for completed sales.
pub const SALE: &str = "SALE";

/// A paid order as reported by the Core API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    /// Core API order id
    pub order_id: String,
    /// Total paid by the buyer
    pub total_cents: i64,
}

/// Aggregated totals for one business date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DailyTotals {
    /// Gross sales
    pub sales_cents: i64,
    /// Platform fees
    pub fees_cents: i64,
    /// Seller revenue
    pub revenue_cents: i64,
    /// Number of entries
    pub transaction_count: i64,
}

/// Records a paid order in the ledger.
///
/// Rejects blank ids, non-positive amounts and orders that are already logged.
/// The row is inserted inside a transaction and archived before the commit, so the
/// archive only ever gets a line for an order the database accepted. The primary key
/// on `order_id` decides between concurrent records of the same order.
#[instrument(skip(db, archive, fees), fields(order_id = %order.order_id))]
pub async fn process_new_order(
    db: &DatabaseConnection,
    archive: &ArchiveWriter,
    fees: &FeeSchedule,
    order: &NewOrder,
    recorded_at: DateTime<Utc>,
) -> Result<transaction_log::Model> {
    let order_id = order.order_id.trim();
    if order_id.is_empty() {
        return Err(Error::InvalidInput {
            message: "order id must not be empty".to_string(),
        });
    }
    if order.total_cents <= 0 {
        return Err(Error::InvalidAmount {
            input: format_cents(order.total_cents),
        });
    }

    let split = fees.split(order.total_cents);
    let active = transaction_log::ActiveModel {
        order_id: Set(order_id.to_string()),
        transaction_type: Set(SALE.to_string()),
        recorded_at: Set(recorded_at),
        business_date: Set(recorded_at.date_naive()),
        amount_cents: Set(order.total_cents),
        platform_fee_cents: Set(split.platform_cents),
        seller_share_cents: Set(split.seller_cents),
    };

    let txn = db.begin().await?;
    let stored = active
        .insert(&txn)
        .await
        .map_err(|e| duplicate_or_db_error(e, order_id))?;
    // Dropping the transaction on an archive error rolls the insert back.
    archive.append(&stored).await?;
    txn.commit().await?;

    info!(
        amount = %format_cents(stored.amount_cents),
        platform_fee = %format_cents(stored.platform_fee_cents),
        "Transaction {} processed successfully", stored.order_id
    );
    Ok(stored)
}

fn duplicate_or_db_error(err: DbErr, order_id: &str) -> Error {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => Error::DuplicateOrder {
            order_id: order_id.to_string(),
        },
        _ => Error::Database(err),
    }
}

/// Returns all log entries for a business date, oldest first.
pub async fn get_logs_for_date(
    db: &DatabaseConnection,
    business_date: NaiveDate,
) -> Result<Vec<transaction_log::Model>> {
    TransactionLog::find()
        .filter(transaction_log::Column::BusinessDate.eq(business_date))
        .order_by_asc(transaction_log::Column::RecordedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Sums a day's entries.
#[must_use]
pub fn summarize_totals(logs: &[transaction_log::Model]) -> DailyTotals {
    logs.iter().fold(DailyTotals::default(), |acc, log| DailyTotals {
        sales_cents: acc.sales_cents + log.amount_cents,
        fees_cents: acc.fees_cents + log.platform_fee_cents,
        revenue_cents: acc.revenue_cents + log.seller_share_cents,
        transaction_count: acc.transaction_count + 1,
    })
}

/// Runs the end-of-day batch for `business_date` and commits the summary.
///
/// A day without sales still commits a zero row so dashboards show the gap explicitly.
#[instrument(skip(db))]
pub async fn run_daily_reconciliation(
    db: &DatabaseConnection,
    business_date: NaiveDate,
    committed_at: DateTime<Utc>,
) -> Result<daily_summary::Model> {
    let logs = get_logs_for_date(db, business_date).await?;
    let totals = summarize_totals(&logs);
    let summary = commit_summary(db, business_date, totals, committed_at).await?;

    info!(
        sales = %format_cents(summary.sales_cents),
        fees = %format_cents(summary.fees_cents),
        count = summary.transaction_count,
        "Daily reconciliation for {business_date} completed"
    );
    Ok(summary)
}

/// Writes (or overwrites) the summary row for a date.
async fn commit_summary(
    db: &DatabaseConnection,
    business_date: NaiveDate,
    totals: DailyTotals,
    committed_at: DateTime<Utc>,
) -> Result<daily_summary::Model> {
    let txn = db.begin().await?;

    let row = daily_summary::ActiveModel {
        business_date: Set(business_date),
        sales_cents: Set(totals.sales_cents),
        fees_cents: Set(totals.fees_cents),
        revenue_cents: Set(totals.revenue_cents),
        transaction_count: Set(totals.transaction_count),
        committed_at: Set(committed_at),
    };

    let existing = DailySummary::find_by_id(business_date).one(&txn).await?;
    let saved = if existing.is_some() {
        row.update(&txn).await?
    } else {
        row.insert(&txn).await?
    };

    txn.commit().await?;
    Ok(saved)
}

/// Fetches the committed summary for a date, if the batch has run.
pub async fn get_daily_summary(
    db: &DatabaseConnection,
    business_date: NaiveDate,
) -> Result<Option<daily_summary::Model>> {
    DailySummary::find_by_id(business_date)
        .one(db)
        .await
        .map_err(Into::into)
}
