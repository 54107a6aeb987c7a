//! Fulfillment commands - proof of shipping or live delivery for an order.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, checks::is_verified_seller, responses},
        core::api::{ApiOutcome, LiveRequest, ShipRequest},
        errors::{Error, Result},
    };
    use tracing::{error, info};

    async fn reply(ctx: poise::Context<'_, BotData, Error>, content: String) -> Result<()> {
        ctx.send(
            poise::CreateReply::default()
                .content(content)
                .ephemeral(true),
        )
        .await?;
        Ok(())
    }

    /// Order fulfillment tools for sellers.
    #[poise::command(
        slash_command,
        subcommands("ship", "live"),
        check = "is_verified_seller"
    )]
    pub async fn fulfill(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say(
            "Order fulfillment. Available subcommands:\n\
            `/fulfill ship` - Submit a tracking number\n\
            `/fulfill live` - Submit a stream VOD as proof of live delivery",
        )
        .await?;
        Ok(())
    }

    /// Submit tracking info for a physical shipment.
    #[poise::command(slash_command, check = "is_verified_seller")]
    pub async fn ship(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "The order ID (from your DMs)"] order_id: String,
        #[description = "The shipping tracking number"] tracking_number: String,
        #[description = "Carrier (e.g., USPS, UPS, FedEx)"] carrier: String,
    ) -> Result<()> {
        ctx.defer_ephemeral().await?;

        let request = ShipRequest {
            tracking_number: tracking_number.clone(),
            carrier: carrier.clone(),
            seller_discord_id: ctx.author().id.to_string(),
        };
        let result = ctx.data().api.fulfill_ship(&order_id, &request).await;

        match &result {
            Ok(ApiOutcome::Success(_)) => info!("Order {order_id} marked as shipped"),
            Ok(ApiOutcome::Unexpected { status, error }) => {
                error!("Fulfill API Error for {order_id}: {status} - {error:?}");
            }
            Err(e) if e.is_network() => error!("Connection error contacting Core API: {e}"),
            Err(e) => error!("Unexpected error fulfilling {order_id}: {e}"),
            Ok(_) => {}
        }

        reply(
            ctx,
            responses::ship_reply(&order_id, &tracking_number, &carrier, &result),
        )
        .await
    }

    /// Submit a stream VOD as proof of a live delivery.
    #[poise::command(slash_command, check = "is_verified_seller")]
    pub async fn live(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "The order ID"] order_id: String,
        #[description = "Link to the Twitch or YouTube VOD"] vod_url: String,
    ) -> Result<()> {
        ctx.defer_ephemeral().await?;

        if !responses::is_supported_vod_url(&vod_url) {
            return reply(ctx, responses::INVALID_VOD_URL.to_string()).await;
        }

        let request = LiveRequest {
            vod_url: vod_url.clone(),
            seller_discord_id: ctx.author().id.to_string(),
        };
        let result = ctx.data().api.fulfill_live(&order_id, &request).await;

        match &result {
            Ok(ApiOutcome::Success(_)) => info!("Order {order_id} verified live"),
            Ok(outcome) => error!("Live fulfill rejected for {order_id}: {:?}", outcome),
            Err(e) => error!("Live fulfill request for {order_id} failed: {e}"),
        }

        reply(ctx, responses::live_reply(&order_id, &vod_url, &result)).await
    }
}

// Re-export all commands
pub use inner::*;
