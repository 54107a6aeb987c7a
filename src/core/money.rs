//! Money helpers - prices as integer cents and the platform fee split.
//!
//! Amounts typed by sellers arrive as strings like `"450"` or `"$450.00"`. They are
//! converted to cents once, at the edge, so the ledger never does float arithmetic.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};

const BASIS_POINTS: i64 = 10_000;

/// Parses a user-typed price into cents.
///
/// Accepts an optional leading `$` and at most two decimal places. Zero, negative
/// and non-numeric input is rejected.
pub fn parse_price_to_cents(input: &str) -> Result<i64> {
    let invalid = || Error::InvalidAmount {
        input: input.to_string(),
    };

    let trimmed = input.trim();
    let digits = trimmed.strip_prefix('$').unwrap_or(trimmed).trim();
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));

    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit())
    {
        return Err(invalid());
    }
    if fraction.len() > 2 {
        return Err(invalid());
    }

    let whole_cents = if whole.is_empty() {
        0
    } else {
        whole
            .parse::<i64>()
            .ok()
            .and_then(|w| w.checked_mul(100))
            .ok_or_else(invalid)?
    };
    let fraction_cents = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
        _ => fraction.parse::<i64>().map_err(|_| invalid())?,
    };

    let cents = whole_cents.checked_add(fraction_cents).ok_or_else(invalid)?;
    if cents <= 0 {
        return Err(invalid());
    }
    Ok(cents)
}

/// Formats cents as a dollar string, e.g. `45000` -> `"$450.00"`.
#[must_use]
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}${}.{:02}", abs / 100, abs % 100)
}

/// Converts cents to the float dollars the Core API expects in drop payloads.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn cents_to_dollars(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// How a sale is divided between the platform and the seller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSplit {
    /// Platform's cut
    pub platform_cents: i64,
    /// Seller's cut
    pub seller_cents: i64,
}

/// Platform share expressed in basis points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSchedule {
    platform_bps: i64,
}

impl FeeSchedule {
    /// Builds a schedule from a fractional share (`0.10` = 10%).
    pub fn from_share(platform_share: f64) -> Result<Self> {
        if !platform_share.is_finite() || !(0.0..=1.0).contains(&platform_share) {
            return Err(Error::Config {
                message: format!("platform share must be between 0 and 1, got {platform_share}"),
            });
        }
        #[allow(clippy::cast_possible_truncation)]
        let platform_bps = (platform_share * 10_000.0).round() as i64;
        Ok(Self { platform_bps })
    }

    /// Platform share in basis points.
    #[must_use]
    pub const fn platform_bps(&self) -> i64 {
        self.platform_bps
    }

    /// Splits `amount_cents`; the platform fee rounds half up, the seller gets the rest.
    #[must_use]
    pub fn split(&self, amount_cents: i64) -> FeeSplit {
        let scaled = i128::from(amount_cents) * i128::from(self.platform_bps);
        let platform = (scaled + i128::from(BASIS_POINTS / 2)) / i128::from(BASIS_POINTS);
        let platform_cents = i64::try_from(platform).unwrap_or(amount_cents);
        FeeSplit {
            platform_cents,
            seller_cents: amount_cents - platform_cents,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_parse_price_accepts_common_forms() {
        assert_eq!(parse_price_to_cents("450").unwrap(), 45_000);
        assert_eq!(parse_price_to_cents("450.00").unwrap(), 45_000);
        assert_eq!(parse_price_to_cents("$450.5").unwrap(), 45_050);
        assert_eq!(parse_price_to_cents("  $ 12.34 ").unwrap(), 1_234);
        assert_eq!(parse_price_to_cents(".99").unwrap(), 99);
    }

    #[test]
    fn test_parse_price_rejects_bad_input() {
        for input in ["", "$", "abc", "-5", "0", "0.00", "1.234", "12,50", "1e3", "4.5.6"] {
            assert!(
                matches!(parse_price_to_cents(input), Err(Error::InvalidAmount { .. })),
                "expected {input:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_parse_price_rejects_overflow() {
        assert!(parse_price_to_cents("99999999999999999999").is_err());
    }

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(45_000), "$450.00");
        assert_eq!(format_cents(5), "$0.05");
        assert_eq!(format_cents(0), "$0.00");
        assert_eq!(format_cents(-1_250), "-$12.50");
    }

    #[test]
    fn test_cents_to_dollars() {
        assert_eq!(cents_to_dollars(45_050), 450.5);
    }

    #[test]
    fn test_ten_percent_split() {
        let fees = FeeSchedule::from_share(0.10).unwrap();
        assert_eq!(fees.platform_bps(), 1_000);

        let split = fees.split(15_000);
        assert_eq!(split.platform_cents, 1_500);
        assert_eq!(split.seller_cents, 13_500);
    }

    #[test]
    fn test_split_rounds_half_up_and_sums_exactly() {
        let fees = FeeSchedule::from_share(0.10).unwrap();
        // 10% of 1.25 is 0.125 -> 0.13
        let split = fees.split(125);
        assert_eq!(split.platform_cents, 13);
        assert_eq!(split.seller_cents, 112);

        for amount in [1, 7, 99, 101, 45_055, 1_000_003] {
            let split = fees.split(amount);
            assert_eq!(split.platform_cents + split.seller_cents, amount);
        }
    }

    #[test]
    fn test_from_share_bounds() {
        assert!(FeeSchedule::from_share(-0.1).is_err());
        assert!(FeeSchedule::from_share(1.01).is_err());
        assert!(FeeSchedule::from_share(f64::NAN).is_err());
        assert_eq!(FeeSchedule::from_share(1.0).unwrap().split(500).seller_cents, 0);
        assert_eq!(FeeSchedule::from_share(0.0).unwrap().split(500).platform_cents, 0);
    }
}
