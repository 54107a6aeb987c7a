//! Background scheduling for the daily reconciliation batch.

use crate::{
    core::ledger,
    errors::{Error, Result},
};
use chrono::{DateTime, Days, NaiveDate, Utc};
use sea_orm::DatabaseConnection;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Next UTC instant at `hour:00:00` strictly after `now`.
pub fn next_run_after(now: DateTime<Utc>, hour: u32) -> Result<DateTime<Utc>> {
    let today = now
        .date_naive()
        .and_hms_opt(hour, 0, 0)
        .ok_or_else(|| Error::Config {
            message: format!("invalid reconciliation hour {hour}"),
        })?
        .and_utc();

    if today > now {
        Ok(today)
    } else {
        today.checked_add_days(Days::new(1)).ok_or_else(|| Error::Config {
            message: "reconciliation schedule overflowed the calendar".to_string(),
        })
    }
}

/// The business date a run at `run_at` closes out: the UTC day before it.
#[must_use]
pub fn business_date_closed_by(run_at: DateTime<Utc>) -> NaiveDate {
    let date = run_at.date_naive();
    date.pred_opt().unwrap_or(date)
}

/// Spawns the daily batch loop. Failures are logged and the loop keeps going.
pub fn spawn_daily_reconciliation(db: DatabaseConnection, run_at_hour: u32) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let now = Utc::now();
            let next = match next_run_after(now, run_at_hour) {
                Ok(next) => next,
                Err(e) => {
                    error!("Daily reconciliation disabled: {e}");
                    return;
                }
            };

            info!("Next daily reconciliation scheduled for {next}");
            tokio::time::sleep((next - now).to_std().unwrap_or_default()).await;

            let business_date = business_date_closed_by(next);
            if let Err(e) = ledger::run_daily_reconciliation(&db, business_date, Utc::now()).await {
                error!("Daily reconciliation for {business_date} failed: {e}");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_next_run_later_today() {
        let now = Utc.with_ymd_and_hms(2023, 10, 27, 1, 30, 0).unwrap();
        let next = next_run_after(now, 3).unwrap();
        assert_eq!(next, Utc.with_ymd_and_hms(2023, 10, 27, 3, 0, 0).unwrap());
    }

    #[test]
    fn test_next_run_rolls_to_tomorrow() {
        let now = Utc.with_ymd_and_hms(2023, 10, 27, 10, 0, 0).unwrap();
        let next = next_run_after(now, 0).unwrap();
        assert_eq!(next, Utc.with_ymd_and_hms(2023, 10, 28, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_next_run_is_strictly_after_now() {
        let now = Utc.with_ymd_and_hms(2023, 12, 31, 0, 0, 0).unwrap();
        let next = next_run_after(now, 0).unwrap();
        assert_eq!(next, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_invalid_hour() {
        assert!(next_run_after(Utc::now(), 24).is_err());
    }

    #[test]
    fn test_business_date_closed_by_midnight_run() {
        let run_at = Utc.with_ymd_and_hms(2023, 10, 28, 0, 0, 0).unwrap();
        assert_eq!(
            business_date_closed_by(run_at),
            NaiveDate::from_ymd_opt(2023, 10, 27).unwrap()
        );
    }
}
