//! Request and response contracts of the Core API.
//!
//! Field names follow the JSON the Core API binds, so these types are
//! serialized as-is.

#![deny(missing_docs)]

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// How a drop is fulfilled once sold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropType {
    /// Built item, fulfilled with a tracking number
    #[default]
    ReadyToShip,
    /// Built on stream after purchase, fulfilled with a VOD link
    Commission,
}

impl DropType {
    /// Label shown in marketplace embeds
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ReadyToShip => "Ready-to-Ship",
            Self::Commission => "Commission Slot",
        }
    }

    /// Emoji shown next to the label
    #[must_use]
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::ReadyToShip => "📦",
            Self::Commission => "🎨",
        }
    }
}

impl FromStr for DropType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "rts" | "ready_to_ship" | "ready-to-ship" | "ready to ship" => {
                Ok(Self::ReadyToShip)
            }
            "commission" | "comm" => Ok(Self::Commission),
            other => Err(Error::InvalidInput {
                message: format!("unknown drop type '{other}', use 'rts' or 'commission'"),
            }),
        }
    }
}

/// Body of `POST /api/internal/seller/onboard`
#[derive(Debug, Clone, Serialize)]
pub struct OnboardRequest {
    /// Discord id of the user connecting Stripe
    pub discord_id: String,
}

/// Any response that hands back a link
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UrlResponse {
    /// Target link, absent on malformed replies
    #[serde(default)]
    pub url: Option<String>,
}

/// Body of `POST /api/internal/drops/create`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateDropRequest {
    /// Seller creating the drop
    pub seller_discord_id: String,
    /// Listing title (max 100 chars)
    pub title: String,
    /// Price in dollars
    pub price: f64,
    /// Free-form description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Hero image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Sales model
    #[serde(rename = "type")]
    pub drop_type: DropType,
}

/// A marketplace listing as stored by the Core API
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Drop {
    /// Drop id, used in the buy button's custom id
    pub id: String,
    /// Seller who listed it
    #[serde(default)]
    pub seller_discord_id: String,
    /// Listing title
    #[serde(default)]
    pub title: String,
    /// Price in dollars
    #[serde(default)]
    pub price: f64,
    /// Hero image, empty when none
    #[serde(default)]
    pub image_url: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Sales model
    #[serde(rename = "type", default)]
    pub drop_type: DropType,
    /// `available`, `pending_payment` or `sold`
    #[serde(default)]
    pub status: String,
}

/// Body of `POST /api/v1/orders/{id}/fulfill/ship`
#[derive(Debug, Clone, Serialize)]
pub struct ShipRequest {
    /// Carrier tracking number
    pub tracking_number: String,
    /// Carrier name, e.g. `UPS`
    pub carrier: String,
    /// Lets the Core API check the caller owns the order
    pub seller_discord_id: String,
}

/// Body of `POST /api/v1/orders/{id}/fulfill/live`
#[derive(Debug, Clone, Serialize)]
pub struct LiveRequest {
    /// Twitch or YouTube VOD proving the build happened on stream
    pub vod_url: String,
    /// Lets the Core API check the caller owns the order
    pub seller_discord_id: String,
}

/// Success body of both fulfillment endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FulfillmentReceipt {
    /// Usually `success`
    #[serde(default)]
    pub status: Option<String>,
    /// Human readable note
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `POST /api/v1/checkout/session`
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutRequest {
    /// Drop being bought
    pub drop_id: String,
    /// Buyer who clicked the button
    pub buyer_discord_id: String,
}

/// Product ids are numeric in some deployments and strings in others.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    /// Numeric id
    Number(i64),
    /// String id
    Text(String),
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// An active listing from `GET /api/products`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    /// Product id
    pub id: ProductId,
    /// Display name
    pub name: String,
    /// Price in dollars
    pub price: f64,
    /// Free-form description
    #[serde(default)]
    pub description: String,
}

/// Error body the Core API sends with non-2xx statuses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    /// Reason for the failure
    #[serde(default)]
    pub error: Option<String>,
}

/// A Core API reply, classified by status code.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiOutcome<T> {
    /// 2xx with a parsed body
    Success(T),
    /// 400
    BadRequest(Option<String>),
    /// 403
    Forbidden(Option<String>),
    /// 404
    NotFound(Option<String>),
    /// 409
    Conflict(Option<String>),
    /// Any other status
    Unexpected {
        /// HTTP status code
        status: u16,
        /// `error` field of the body, if any
        error: Option<String>,
    },
}

impl<T> ApiOutcome<T> {
    /// Classifies a non-success status.
    #[must_use]
    pub fn from_error_status(status: u16, error: Option<String>) -> Self {
        match status {
            400 => Self::BadRequest(error),
            403 => Self::Forbidden(error),
            404 => Self::NotFound(error),
            409 => Self::Conflict(error),
            _ => Self::Unexpected { status, error },
        }
    }

    /// The `error` text the Core API sent, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::BadRequest(e) | Self::Forbidden(e) | Self::NotFound(e) | Self::Conflict(e) => {
                e.as_deref()
            }
            Self::Unexpected { error, .. } => error.as_deref(),
        }
    }

    /// Transforms the success value, leaving error statuses untouched.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ApiOutcome<U> {
        match self {
            Self::Success(value) => ApiOutcome::Success(f(value)),
            Self::BadRequest(e) => ApiOutcome::BadRequest(e),
            Self::Forbidden(e) => ApiOutcome::Forbidden(e),
            Self::NotFound(e) => ApiOutcome::NotFound(e),
            Self::Conflict(e) => ApiOutcome::Conflict(e),
            Self::Unexpected { status, error } => ApiOutcome::Unexpected { status, error },
        }
    }
}
