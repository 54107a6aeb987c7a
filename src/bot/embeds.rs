//! Brand embeds - the C500 pastel palette and reusable embed builders.
//!
//! Every user-facing embed goes through these helpers so colors, footers and
//! emoji stay consistent across commands and the buy button.

use crate::{
    core::{api::DropType, money::format_cents},
    entities::{daily_summary, transaction_log},
};
use poise::serenity_prelude as serenity;

/// Sakura pink, main listing embeds
pub const COLOR_PRIMARY: u32 = 0x00FF_B7C5;
/// Pastel blue, info and thinking states
pub const COLOR_SECONDARY: u32 = 0x00AE_C6CF;
/// Pastel green, confirmations
pub const COLOR_SUCCESS: u32 = 0x0077_DD77;
/// Pastel red, errors (soft, not alarming)
pub const COLOR_ERROR: u32 = 0x00FF_6961;
/// Pastel yellow, special alerts and live status
pub const COLOR_GOLD: u32 = 0x00FD_FD96;

/// Standard footer text
pub const FOOTER_TEXT: &str = "C500 Collective • Cozy Builds & Community";
/// Standard footer / author icon
pub const FOOTER_ICON_URL: &str = "https://c500.store/static/images/bot-icon-small.png";

/// Everything shown on a marketplace post.
#[derive(Debug, Clone)]
pub struct DropListing<'a> {
    /// Item title
    pub title: &'a str,
    /// Body text under the title
    pub description: &'a str,
    /// Preformatted price, e.g. `"$450.00"`
    pub price: &'a str,
    /// Display name of the seller
    pub seller_name: &'a str,
    /// Core API drop id
    pub drop_id: &'a str,
    /// Hero image, ignored unless it is an http(s) URL
    pub image_url: Option<&'a str>,
    /// Sales model
    pub drop_type: DropType,
}

fn branded_footer() -> serenity::CreateEmbedFooter {
    serenity::CreateEmbedFooter::new(FOOTER_TEXT).icon_url(FOOTER_ICON_URL)
}

/// The "storefront window" for a new listing in the marketplace channel.
pub fn marketplace_drop_embed(listing: &DropListing<'_>) -> serenity::CreateEmbed {
    let mut embed = serenity::CreateEmbed::default()
        .title(format!("✨ New Drop: {}", listing.title))
        .description(listing.description)
        .color(COLOR_PRIMARY)
        .timestamp(serenity::Timestamp::now())
        .field("🏷️ Price", format!("**{}**", listing.price), true)
        .field(
            format!("{} Type", listing.drop_type.emoji()),
            listing.drop_type.label(),
            true,
        )
        .field("🆔 Drop ID", format!("`{}`", listing.drop_id), false)
        .author(
            serenity::CreateEmbedAuthor::new(format!("Listed by {}", listing.seller_name))
                .icon_url(FOOTER_ICON_URL),
        )
        .footer(branded_footer());

    if let Some(url) = listing.image_url.filter(|url| url.starts_with("http")) {
        embed = embed.image(url);
    }

    embed
}

/// Sent privately to a buyer once their payment went through.
pub fn order_confirmation_embed(
    order_id: &str,
    item_title: &str,
    price: &str,
    expected_action: &str,
) -> serenity::CreateEmbed {
    serenity::CreateEmbed::default()
        .title("🎉 Order Confirmed!")
        .description(format!(
            "Hurray! Your purchase of **{item_title}** is confirmed."
        ))
        .color(COLOR_SUCCESS)
        .timestamp(serenity::Timestamp::now())
        .field("Total Paid", price, true)
        .field("Order #", format!("`{order_id}`"), true)
        .field("What's Next?", expected_action, false)
        .footer(serenity::CreateEmbedFooter::new(
            "Thank you for supporting C500 builders!",
        ))
}

/// A simple green success message.
pub fn success_embed(message: &str) -> serenity::CreateEmbed {
    serenity::CreateEmbed::default()
        .description(format!("✅ {message}"))
        .color(COLOR_SUCCESS)
}

/// A soft red error message. `title` defaults to "Oops!".
pub fn error_embed(message: &str, title: Option<&str>) -> serenity::CreateEmbed {
    serenity::CreateEmbed::default()
        .title(format!("⚠️ {}", title.unwrap_or("Oops!")))
        .description(message)
        .color(COLOR_ERROR)
}

/// Placeholder shown while waiting on the Core API.
pub fn thinking_embed(message: Option<&str>) -> serenity::CreateEmbed {
    serenity::CreateEmbed::default()
        .description(format!("🔄 {}", message.unwrap_or("Processing...")))
        .color(COLOR_SECONDARY)
}

/// Receipt for an order written to the ledger.
pub fn ledger_entry_embed(entry: &transaction_log::Model) -> serenity::CreateEmbed {
    serenity::CreateEmbed::default()
        .title(format!("🧾 Recorded {}", entry.transaction_type))
        .description(format!("Order `{}`", entry.order_id))
        .color(COLOR_SUCCESS)
        .field("Amount", format_cents(entry.amount_cents), true)
        .field("Platform Fee", format_cents(entry.platform_fee_cents), true)
        .field("Seller Share", format_cents(entry.seller_share_cents), true)
        .field("Business Date", entry.business_date.to_string(), false)
        .footer(branded_footer())
}

/// End-of-day totals for one business date.
pub fn daily_summary_embed(summary: &daily_summary::Model) -> serenity::CreateEmbed {
    serenity::CreateEmbed::default()
        .title(format!("📊 Daily Reconciliation: {}", summary.business_date))
        .color(COLOR_GOLD)
        .field("Sales", format_cents(summary.sales_cents), true)
        .field("Fees", format_cents(summary.fees_cents), true)
        .field("Revenue", format_cents(summary.revenue_cents), true)
        .field("Transactions", summary.transaction_count.to_string(), false)
        .footer(branded_footer())
}
