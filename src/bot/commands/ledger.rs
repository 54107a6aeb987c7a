//! Ledger commands - record paid orders and run the end-of-day batch by hand.
//!
//! The daily batch normally runs on its own (see [`crate::core::schedule`]); these
//! commands let an owner backfill an order or rerun a day.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, embeds},
        core::{
            ledger::{self, NewOrder},
            money,
            schedule,
        },
        errors::{Error, Result},
    };
    use chrono::{NaiveDate, Utc};
    use poise::serenity_prelude as serenity;
    use tracing::{info, warn};

    /// Message sent to buyers under "What's Next?".
    const NEXT_STEP: &str = "The seller has been notified and will ship or go live with your item soon. Watch your DMs for updates.";

    async fn reply_error(ctx: poise::Context<'_, BotData, Error>, message: &str) -> Result<()> {
        ctx.send(
            poise::CreateReply::default()
                .embed(embeds::error_embed(message, None))
                .ephemeral(true),
        )
        .await?;
        Ok(())
    }

    /// Parses `YYYY-MM-DD`.
    pub(crate) fn parse_business_date(input: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()
    }

    /// Ledger tools.
    #[poise::command(
        slash_command,
        subcommands("record", "reconcile"),
        owners_only,
        hide_in_help
    )]
    pub async fn ledger(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say(
            "Ledger tools. Available subcommands:\n\
            `/ledger record` - Record a paid order\n\
            `/ledger reconcile` - Run the daily reconciliation for a date",
        )
        .await?;
        Ok(())
    }

    /// Records a paid order and optionally sends the buyer a confirmation.
    #[poise::command(slash_command, owners_only)]
    pub async fn record(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Order ID"] order_id: String,
        #[description = "Total paid (e.g., 150.00)"] amount: String,
        #[description = "Buyer to DM a confirmation to"] buyer: Option<serenity::User>,
        #[description = "Item name for the confirmation"] item: Option<String>,
    ) -> Result<()> {
        ctx.defer_ephemeral().await?;

        let total_cents = match money::parse_price_to_cents(&amount) {
            Ok(cents) => cents,
            Err(e) => return reply_error(ctx, &e.to_string()).await,
        };

        let data = ctx.data();
        let order = NewOrder {
            order_id,
            total_cents,
        };
        let entry = match ledger::process_new_order(
            &data.database,
            &data.archive,
            &data.fees,
            &order,
            Utc::now(),
        )
        .await
        {
            Ok(entry) => entry,
            Err(
                e @ (Error::DuplicateOrder { .. }
                | Error::InvalidAmount { .. }
                | Error::InvalidInput { .. }),
            ) => return reply_error(ctx, &e.to_string()).await,
            Err(e) => return Err(e),
        };

        let mut reply = poise::CreateReply::default()
            .embed(embeds::ledger_entry_embed(&entry))
            .ephemeral(true);

        if let Some(buyer) = buyer {
            let confirmation = embeds::order_confirmation_embed(
                &entry.order_id,
                item.as_deref().unwrap_or("your item"),
                &money::format_cents(entry.amount_cents),
                NEXT_STEP,
            );
            let dm = serenity::CreateMessage::new().embed(confirmation);
            match buyer.direct_message(ctx.serenity_context(), dm).await {
                Ok(_) => info!("Order confirmation for {} sent to {}", entry.order_id, buyer.id),
                Err(e) => {
                    warn!("Could not DM buyer {}: {e}", buyer.id);
                    reply = reply.content(format!(
                        "⚠️ Recorded, but I couldn't DM {}. They may have DMs closed.",
                        buyer.name
                    ));
                }
            }
        }

        ctx.send(reply).await?;
        Ok(())
    }

    /// Runs the daily reconciliation for a date (defaults to yesterday, UTC).
    #[poise::command(slash_command, owners_only)]
    pub async fn reconcile(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Business date as YYYY-MM-DD"] date: Option<String>,
    ) -> Result<()> {
        ctx.defer_ephemeral().await?;

        let business_date = match date.as_deref() {
            Some(input) => match parse_business_date(input) {
                Some(date) => date,
                None => {
                    return reply_error(ctx, "Dates must look like `2024-01-31`.").await;
                }
            },
            None => schedule::business_date_closed_by(Utc::now()),
        };

        let summary =
            ledger::run_daily_reconciliation(&ctx.data().database, business_date, Utc::now())
                .await?;

        ctx.send(
            poise::CreateReply::default()
                .embed(embeds::daily_summary_embed(&summary))
                .ephemeral(true),
        )
        .await?;
        Ok(())
    }

}

// Re-export all commands
pub use inner::*;
