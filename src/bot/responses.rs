//! Reply templates - maps Core API outcomes to the text users see.
//!
//! Commands stay thin: they call the API, log, and hand the outcome to one of
//! these functions. Keeping the wording here lets it be tested without Discord.

use crate::{core::api::ApiOutcome, errors::Result};
use std::time::Duration;

/// Shown when a seller-only command is used by someone without the seller role.
pub const NOT_A_SELLER: &str = "❌ You must be a verified seller to use this.";
/// Shown when a command fails unexpectedly.
pub const INTERNAL_ERROR: &str = "❌ An internal error occurred. The devs have been notified.";

/// Shown above the checkout link button.
pub const CHECKOUT_LINK_TEXT: &str = "**Click below to complete your purchase securely on Stripe.**\n*This link expires in 30 minutes.*";
/// Label of the checkout link button.
pub const CHECKOUT_BUTTON_LABEL: &str = "👉 Proceed to Secure Checkout";

/// Reply to `/c500 setup`.
#[must_use]
pub fn onboarding_reply(result: &Result<ApiOutcome<String>>) -> String {
    match result {
        Ok(ApiOutcome::Success(url)) => format!("Click here to connect Stripe: {url}"),
        Ok(ApiOutcome::Conflict(error)) => format!(
            "⚠️ {}",
            error
                .as_deref()
                .unwrap_or("Your Stripe account is already connected.")
        ),
        Ok(outcome) => format!(
            "⚠️ Could not create an onboarding link: {}",
            outcome.error_message().unwrap_or("Unknown error")
        ),
        Err(e) if e.is_network() => {
            "📡 Could not connect to the C500 Core API. Try again later.".to_string()
        }
        Err(_) => INTERNAL_ERROR.to_string(),
    }
}

/// Reply to `/fulfill ship`.
#[must_use]
pub fn ship_reply<T>(
    order_id: &str,
    tracking_number: &str,
    carrier: &str,
    result: &Result<ApiOutcome<T>>,
) -> String {
    match result {
        Ok(ApiOutcome::Success(_)) => format!(
            "✅ **Success!** Order `{order_id}` marked as shipped via {carrier}.\n\
             Tracking: `{tracking_number}`.\n\
             Funds will be released shortly once tracking activates."
        ),
        Ok(ApiOutcome::NotFound(_)) => {
            format!("❌ Error: Order ID `{order_id}` not found or does not belong to you.")
        }
        Ok(ApiOutcome::BadRequest(error)) => format!(
            "⚠️ Cannot ship: {}",
            error.as_deref().unwrap_or("Invalid request")
        ),
        Ok(ApiOutcome::Forbidden(_)) => "❌ You are not the seller of this order.".to_string(),
        Ok(_) => "🔥 An internal API error occurred. Please contact support.".to_string(),
        Err(e) if e.is_network() => {
            "📡 Could not connect to the C500 Core API. Try again later.".to_string()
        }
        Err(_) => "🔥 An internal API error occurred. Please contact support.".to_string(),
    }
}

/// True for Twitch or YouTube links, the only VOD hosts accepted as proof.
#[must_use]
pub fn is_supported_vod_url(url: &str) -> bool {
    url.contains("twitch.tv") || url.contains("youtube.com")
}

/// Shown when `/fulfill live` gets a link from another host.
pub const INVALID_VOD_URL: &str = "⚠️ Please provide a valid Twitch or YouTube URL.";

/// Reply to `/fulfill live`.
#[must_use]
pub fn live_reply<T>(order_id: &str, vod_url: &str, result: &Result<ApiOutcome<T>>) -> String {
    match result {
        Ok(ApiOutcome::Success(_)) => format!(
            "🎥 **Success!** Order `{order_id}` marked as verified LIVE.\n\
             VOD linked: <{vod_url}>\n\
             Funds have been released to your balance!"
        ),
        Ok(ApiOutcome::NotFound(_)) => format!("❌ Error: Order ID `{order_id}` not found."),
        Ok(outcome) => format!(
            "⚠️ API Error: {}",
            outcome.error_message().unwrap_or("Unknown error")
        ),
        Err(e) if e.is_network() => "📡 Connection error to Core API.".to_string(),
        Err(e) => format!("⚠️ API Error: {e}"),
    }
}

/// Reply after the drop modal was submitted and accepted.
#[must_use]
pub fn drop_created_reply(channel_mention: Option<&str>) -> String {
    channel_mention.map_or_else(
        || "✅ Drop created successfully! (I couldn't post the listing, ask an admin to check my channel permissions.)".to_string(),
        |channel| format!("✅ Drop created successfully! Posted in {channel}."),
    )
}

/// Reply when the drop could not be created.
#[must_use]
pub fn drop_failed_reply(reason: &str) -> String {
    format!("❌ Error creating drop: {reason}")
}

/// What the buy button's ephemeral message turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutReply {
    /// Show the Stripe link
    Link(String),
    /// Show an error embed
    Failure {
        /// Embed body
        message: &'static str,
        /// Embed title, `None` for the default
        title: Option<&'static str>,
    },
}

/// Maps a checkout attempt to what the buyer sees.
#[must_use]
pub fn checkout_reply(result: Result<ApiOutcome<String>>) -> CheckoutReply {
    match result {
        Ok(ApiOutcome::Success(url)) => CheckoutReply::Link(url),
        Ok(ApiOutcome::Conflict(_)) => CheckoutReply::Failure {
            message: "Sorry, this item is currently pending purchase by someone else!",
            title: Some("Too Late!"),
        },
        Ok(ApiOutcome::NotFound(_)) => CheckoutReply::Failure {
            message: "This listing appears to be invalid or expired.",
            title: None,
        },
        Ok(_) => CheckoutReply::Failure {
            message: "An internal error occurred preparing checkout. Please try again.",
            title: None,
        },
        Err(e) if e.is_network() => CheckoutReply::Failure {
            message: "Could not reach the checkout server. Please try again later.",
            title: Some("Connection Error"),
        },
        Err(_) => CheckoutReply::Failure {
            message: "An unexpected error occurred.",
            title: None,
        },
    }
}

/// Formats a duration as `"{d}d {h}h {m}m {s}s"`.
#[must_use]
pub fn format_uptime(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;
    format!("{days}d {hours}h {minutes}m {seconds}s")
}

/// Joins role mentions, listing at most ten.
#[must_use]
pub fn format_role_list(mentions: &[String]) -> String {
    const SHOWN: usize = 10;
    match mentions.len() {
        0 => "None".to_string(),
        n if n > SHOWN => format!(
            "{} and {} more...",
            mentions[..SHOWN].join(", "),
            n - SHOWN
        ),
        _ => mentions.join(", "),
    }
}

/// Presence types `/setstatus` understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    /// "Playing ..."
    Playing,
    /// "Watching ..."
    Watching,
    /// "Listening to ..."
    Listening,
}

impl ActivityKind {
    /// Case-insensitive parse of `playing`, `watching` or `listening`.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "playing" => Some(Self::Playing),
            "watching" => Some(Self::Watching),
            "listening" => Some(Self::Listening),
            _ => None,
        }
    }

    /// Capitalized name used in the confirmation.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Playing => "Playing",
            Self::Watching => "Watching",
            Self::Listening => "Listening",
        }
    }
}

/// Shown when `/setstatus` gets an unknown activity type.
pub const INVALID_ACTIVITY: &str =
    "❌ Invalid activity type. Use: `playing`, `watching`, or `listening`.";

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{config::settings::CoreApiConfig, core::api::CoreApiClient, errors::Error};

    fn malformed() -> Error {
        Error::MalformedResponse {
            message: "missing url".to_string(),
        }
    }

    /// A real transport error from a Core API nobody listens on.
    async fn network_error() -> Error {
        let client = CoreApiClient::new(&CoreApiConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            internal_key: None,
            timeout_secs: 2,
        })
        .unwrap();
        client.health().await.unwrap_err()
    }

    #[tokio::test]
    async fn test_network_failure_replies() {
        let ship: Result<ApiOutcome<()>> = Err(network_error().await);
        assert_eq!(
            ship_reply("ord_1", "1Z999", "UPS", &ship),
            "📡 Could not connect to the C500 Core API. Try again later."
        );

        let live: Result<ApiOutcome<()>> = Err(network_error().await);
        assert_eq!(
            live_reply("ord_1", "https://twitch.tv/videos/1", &live),
            "📡 Connection error to Core API."
        );

        assert_eq!(
            onboarding_reply(&Err(network_error().await)),
            "📡 Could not connect to the C500 Core API. Try again later."
        );

        assert_eq!(
            checkout_reply(Err(network_error().await)),
            CheckoutReply::Failure {
                message: "Could not reach the checkout server. Please try again later.",
                title: Some("Connection Error"),
            }
        );
    }

    #[test]
    fn test_ship_reply_forbidden() {
        let forbidden: Result<ApiOutcome<()>> = Ok(ApiOutcome::Forbidden(None));
        assert_eq!(
            ship_reply("ord_1", "1Z999", "UPS", &forbidden),
            "❌ You are not the seller of this order."
        );
    }

    #[test]
    fn test_onboarding_reply_conflict() {
        assert_eq!(
            onboarding_reply(&Ok(ApiOutcome::Conflict(None))),
            "⚠️ Your Stripe account is already connected."
        );
        assert_eq!(
            onboarding_reply(&Ok(ApiOutcome::Conflict(Some(
                "Seller already onboarded".to_string()
            )))),
            "⚠️ Seller already onboarded"
        );
        assert_eq!(
            onboarding_reply(&Ok(ApiOutcome::Unexpected {
                status: 500,
                error: None
            })),
            "⚠️ Could not create an onboarding link: Unknown error"
        );
    }

    #[test]
    fn test_checkout_reply_unexpected_status() {
        assert_eq!(
            checkout_reply(Ok(ApiOutcome::Unexpected {
                status: 201,
                error: None
            })),
            CheckoutReply::Failure {
                message: "An internal error occurred preparing checkout. Please try again.",
                title: None,
            }
        );
    }

    #[test]
    fn test_ship_reply_per_status() {
        let ok: Result<ApiOutcome<()>> = Ok(ApiOutcome::Success(()));
        let reply = ship_reply("ord_1", "1Z999", "UPS", &ok);
        assert!(reply.starts_with("✅ **Success!** Order `ord_1` marked as shipped via UPS."));
        assert!(reply.contains("Tracking: `1Z999`."));

        let missing: Result<ApiOutcome<()>> = Ok(ApiOutcome::NotFound(None));
        assert_eq!(
            ship_reply("ord_1", "1Z999", "UPS", &missing),
            "❌ Error: Order ID `ord_1` not found or does not belong to you."
        );

        let bad: Result<ApiOutcome<()>> =
            Ok(ApiOutcome::BadRequest(Some("Order is already fulfilled".to_string())));
        assert_eq!(
            ship_reply("ord_1", "1Z999", "UPS", &bad),
            "⚠️ Cannot ship: Order is already fulfilled"
        );

        let bad_no_body: Result<ApiOutcome<()>> = Ok(ApiOutcome::BadRequest(None));
        assert_eq!(
            ship_reply("ord_1", "1Z999", "UPS", &bad_no_body),
            "⚠️ Cannot ship: Invalid request"
        );

        let boom: Result<ApiOutcome<()>> = Ok(ApiOutcome::Unexpected {
            status: 503,
            error: None,
        });
        assert_eq!(
            ship_reply("ord_1", "1Z999", "UPS", &boom),
            "🔥 An internal API error occurred. Please contact support."
        );
    }

    #[test]
    fn test_live_reply_per_status() {
        let url = "https://www.twitch.tv/videos/123";

        let ok: Result<ApiOutcome<()>> = Ok(ApiOutcome::Success(()));
        assert!(live_reply("ord_2", url, &ok).contains("VOD linked: <https://www.twitch.tv/videos/123>"));

        let missing: Result<ApiOutcome<()>> = Ok(ApiOutcome::NotFound(None));
        assert_eq!(
            live_reply("ord_2", url, &missing),
            "❌ Error: Order ID `ord_2` not found."
        );

        let forbidden: Result<ApiOutcome<()>> = Ok(ApiOutcome::Forbidden(Some(
            "You are not the seller of this order".to_string(),
        )));
        assert_eq!(
            live_reply("ord_2", url, &forbidden),
            "⚠️ API Error: You are not the seller of this order"
        );

        let unknown: Result<ApiOutcome<()>> = Ok(ApiOutcome::Unexpected {
            status: 500,
            error: None,
        });
        assert_eq!(live_reply("ord_2", url, &unknown), "⚠️ API Error: Unknown error");
    }

    #[test]
    fn test_vod_url_hosts() {
        assert!(is_supported_vod_url("https://www.twitch.tv/videos/1"));
        assert!(is_supported_vod_url("https://www.youtube.com/watch?v=abc"));
        assert!(!is_supported_vod_url("https://vimeo.com/123"));
    }

    #[test]
    fn test_checkout_reply_mapping() {
        assert_eq!(
            checkout_reply(Ok(ApiOutcome::Success("https://checkout.stripe.com/x".to_string()))),
            CheckoutReply::Link("https://checkout.stripe.com/x".to_string())
        );
        assert_eq!(
            checkout_reply(Ok(ApiOutcome::Conflict(None))),
            CheckoutReply::Failure {
                message: "Sorry, this item is currently pending purchase by someone else!",
                title: Some("Too Late!"),
            }
        );
        assert_eq!(
            checkout_reply(Ok(ApiOutcome::NotFound(None))),
            CheckoutReply::Failure {
                message: "This listing appears to be invalid or expired.",
                title: None,
            }
        );
        assert_eq!(
            checkout_reply(Err(malformed())),
            CheckoutReply::Failure {
                message: "An unexpected error occurred.",
                title: None,
            }
        );
    }

    #[test]
    fn test_onboarding_reply() {
        let ok = Ok(ApiOutcome::Success("https://connect.stripe.com/x".to_string()));
        assert_eq!(
            onboarding_reply(&ok),
            "Click here to connect Stripe: https://connect.stripe.com/x"
        );
        assert_eq!(onboarding_reply(&Err(malformed())), INTERNAL_ERROR);
    }

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(Duration::from_secs(0)), "0d 0h 0m 0s");
        assert_eq!(
            format_uptime(Duration::from_secs(2 * 86_400 + 3 * 3_600 + 4 * 60 + 5)),
            "2d 3h 4m 5s"
        );
    }

    #[test]
    fn test_format_role_list_truncates() {
        assert_eq!(format_role_list(&[]), "None");

        let few: Vec<String> = (1..=3).map(|i| format!("<@&{i}>")).collect();
        assert_eq!(format_role_list(&few), "<@&1>, <@&2>, <@&3>");

        let many: Vec<String> = (1..=12).map(|i| format!("<@&{i}>")).collect();
        let listed = format_role_list(&many);
        assert!(listed.starts_with("<@&1>, "));
        assert!(listed.ends_with("<@&10> and 2 more..."));
    }

    #[test]
    fn test_activity_parsing() {
        assert_eq!(ActivityKind::parse("Watching"), Some(ActivityKind::Watching));
        assert_eq!(ActivityKind::parse("LISTENING"), Some(ActivityKind::Listening));
        assert_eq!(ActivityKind::parse("streaming"), None);
        assert_eq!(ActivityKind::Playing.label(), "Playing");
    }

    #[test]
    fn test_drop_replies() {
        assert_eq!(
            drop_created_reply(Some("<#123>")),
            "✅ Drop created successfully! Posted in <#123>."
        );
        assert_eq!(
            drop_failed_reply("invalid price"),
            "❌ Error creating drop: invalid price"
        );
    }
}
