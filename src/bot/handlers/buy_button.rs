//! "Buy Now" button - component handler for marketplace posts.
//!
//! Buttons carry the drop id in their custom id (`buy_btn:{drop_id}`) and are
//! dispatched from the gateway event handler, so posts keep working after a restart.

use crate::{
    bot::{
        BotData, embeds,
        responses::{self, CheckoutReply},
    },
    core::api::{ApiOutcome, CheckoutRequest},
    errors::Result,
};
use poise::serenity_prelude as serenity;
use tracing::{error, info, instrument};

/// Custom id prefix of buy buttons.
pub const BUY_BUTTON_PREFIX: &str = "buy_btn:";

/// Builds the green buy button for a drop.
pub fn buy_button(drop_id: &str) -> serenity::CreateButton {
    serenity::CreateButton::new(format!("{BUY_BUTTON_PREFIX}{drop_id}"))
        .style(serenity::ButtonStyle::Success)
        .label("Buy Now <C500>")
        .emoji('💸')
}

/// Extracts the drop id from a buy button's custom id.
#[must_use]
pub fn parse_drop_id(custom_id: &str) -> Option<&str> {
    custom_id
        .strip_prefix(BUY_BUTTON_PREFIX)
        .filter(|drop_id| !drop_id.is_empty())
}

/// Handles a click: acknowledge with a thinking embed, ask the Core API for a
/// checkout session, then swap the message for a link button or an error embed.
#[instrument(skip(ctx, interaction, data), fields(buyer = %interaction.user.id))]
pub async fn handle_buy_click(
    ctx: &serenity::Context,
    interaction: &serenity::ComponentInteraction,
    data: &BotData,
    drop_id: &str,
) -> Result<()> {
    interaction
        .create_response(
            &ctx.http,
            serenity::CreateInteractionResponse::Message(
                serenity::CreateInteractionResponseMessage::new()
                    .embed(embeds::thinking_embed(Some("Contacting secure checkout...")))
                    .ephemeral(true),
            ),
        )
        .await?;

    let request = CheckoutRequest {
        drop_id: drop_id.to_string(),
        buyer_discord_id: interaction.user.id.to_string(),
    };
    let result = data.api.create_checkout_session(&request).await;

    match &result {
        Ok(ApiOutcome::Success(_)) => info!("Checkout session created for drop {drop_id}"),
        Ok(ApiOutcome::Unexpected { status, .. }) => {
            error!("Checkout API Error for drop {drop_id}: Status {status}");
        }
        Err(e) if e.is_network() => {
            error!("Network error contacting Core API during checkout attempt: {e}");
        }
        Err(e) => error!("Unexpected error in buy button callback: {e}"),
        Ok(_) => {}
    }

    let edit = match responses::checkout_reply(result) {
        CheckoutReply::Link(url) => serenity::EditInteractionResponse::new()
            .content(responses::CHECKOUT_LINK_TEXT)
            .embeds(Vec::new())
            .components(vec![serenity::CreateActionRow::Buttons(vec![
                serenity::CreateButton::new_link(url).label(responses::CHECKOUT_BUTTON_LABEL),
            ])]),
        CheckoutReply::Failure { message, title } => {
            serenity::EditInteractionResponse::new().embed(embeds::error_embed(message, title))
        }
    };

    interaction.edit_response(&ctx.http, edit).await?;
    Ok(())
}
