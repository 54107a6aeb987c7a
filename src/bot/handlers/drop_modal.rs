//! Drop creation modal - form definition, validation and submission.

use crate::{
    bot::{BotData, Context, embeds, handlers::buy_button, responses},
    core::{
        api::{ApiOutcome, CreateDropRequest, Drop, DropType},
        money,
    },
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use tracing::{error, info, warn};

/// Longest title the Core API accepts.
pub const MAX_TITLE_LEN: usize = 100;

/// The "Create C500 Drop" form.
#[derive(Debug, Clone, Default, poise::Modal)]
#[name = "Create C500 Drop"]
pub struct DropForm {
    #[name = "Item Title"]
    #[placeholder = "e.g., Snowy TKL Keyboard"]
    #[max_length = 100]
    pub title: String,
    #[name = "Price ($)"]
    #[placeholder = "450.00"]
    pub price: String,
    #[name = "Description"]
    #[placeholder = "Switches, keycaps, build notes..."]
    #[paragraph]
    pub description: Option<String>,
    #[name = "Image URL"]
    #[placeholder = "https://..."]
    pub image_url: Option<String>,
    #[name = "Type (rts or commission)"]
    #[placeholder = "rts"]
    pub drop_type: Option<String>,
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

/// Validates the form and turns it into the Core API payload.
///
/// Returns the request together with the parsed price in cents.
pub fn build_drop_request(
    form: &DropForm,
    seller_discord_id: String,
) -> Result<(CreateDropRequest, i64)> {
    let title = form.title.trim();
    if title.is_empty() {
        return Err(Error::InvalidInput {
            message: "the title cannot be empty".to_string(),
        });
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(Error::InvalidInput {
            message: format!("the title must be at most {MAX_TITLE_LEN} characters"),
        });
    }

    let price_cents = money::parse_price_to_cents(&form.price)?;
    let drop_type = form
        .drop_type
        .as_deref()
        .unwrap_or_default()
        .parse::<DropType>()?;

    let request = CreateDropRequest {
        seller_discord_id,
        title: title.to_string(),
        price: money::cents_to_dollars(price_cents),
        description: non_blank(form.description.as_ref()),
        image_url: non_blank(form.image_url.as_ref()),
        drop_type,
    };
    Ok((request, price_cents))
}

async fn reply(ctx: Context<'_>, content: String) -> Result<()> {
    ctx.send(
        poise::CreateReply::default()
            .content(content)
            .ephemeral(true),
    )
    .await?;
    Ok(())
}

/// Sends a submitted form to the Core API and posts the listing on success.
pub async fn submit(ctx: Context<'_>, form: DropForm) -> Result<()> {
    let seller_id = ctx.author().id.to_string();
    let (request, price_cents) = match build_drop_request(&form, seller_id) {
        Ok(parsed) => parsed,
        Err(e @ (Error::InvalidAmount { .. } | Error::InvalidInput { .. })) => {
            return reply(ctx, responses::drop_failed_reply(&e.to_string())).await;
        }
        Err(e) => return Err(e),
    };

    let drop = match ctx.data().api.submit_drop(&request).await {
        Ok(ApiOutcome::Success(drop)) => drop,
        Ok(outcome) => {
            warn!("Core API rejected drop '{}': {:?}", request.title, outcome);
            let reason = outcome
                .error_message()
                .unwrap_or("the Core API rejected the drop")
                .to_string();
            return reply(ctx, responses::drop_failed_reply(&reason)).await;
        }
        Err(e) => {
            error!("Failed to submit drop '{}': {e}", request.title);
            let reason = if e.is_network() {
                "could not connect to the C500 Core API".to_string()
            } else {
                e.to_string()
            };
            return reply(ctx, responses::drop_failed_reply(&reason)).await;
        }
    };

    info!("Drop {} created by {}", drop.id, ctx.author().id);
    let posted_in = post_listing(ctx, &drop, &request, price_cents).await;
    reply(ctx, responses::drop_created_reply(posted_in.as_deref())).await
}

/// Posts the public listing with its buy button. Returns the channel mention on success.
async fn post_listing(
    ctx: Context<'_>,
    drop: &Drop,
    request: &CreateDropRequest,
    price_cents: i64,
) -> Option<String> {
    let data: &BotData = ctx.data();
    let channel_id = data
        .config
        .discord
        .marketplace_channel_id
        .map_or_else(|| ctx.channel_id(), serenity::ChannelId::new);

    let price = money::format_cents(price_cents);
    let title = if drop.title.is_empty() {
        request.title.as_str()
    } else {
        drop.title.as_str()
    };
    let seller_name = ctx.author().display_name().to_string();
    let listing = embeds::DropListing {
        title,
        description: request.description.as_deref().unwrap_or_default(),
        price: &price,
        seller_name: &seller_name,
        drop_id: &drop.id,
        image_url: request.image_url.as_deref(),
        drop_type: request.drop_type,
    };

    let message = serenity::CreateMessage::new()
        .embed(embeds::marketplace_drop_embed(&listing))
        .components(vec![serenity::CreateActionRow::Buttons(vec![
            buy_button::buy_button(&drop.id),
        ])]);

    match channel_id.send_message(ctx.serenity_context(), message).await {
        Ok(_) => Some(format!("<#{channel_id}>")),
        Err(e) => {
            error!("Failed to post drop {} to channel {channel_id}: {e}", drop.id);
            None
        }
    }
}
