//! Seller commands - `/c500 setup` and `/c500 drop`.
//!
//! Onboarding hands the seller a Stripe Connect link from the Core API. Drop
//! creation opens a modal; the submitted form is handled in
//! [`crate::bot::handlers::drop_modal`].

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, checks::is_verified_seller, handlers::drop_modal, responses},
        core::api::ApiOutcome,
        errors::{Error, Result},
    };
    use std::time::Duration;
    use tracing::{error, info, warn};

    /// How long the drop form stays open.
    const MODAL_TIMEOUT: Duration = Duration::from_secs(600);

    /// C500 seller tools.
    #[poise::command(slash_command, subcommands("setup", "create_drop"))]
    pub async fn c500(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "C500 seller tools. Available subcommands:\n\
            `/c500 setup` - Connect your Stripe account to get paid\n\
            `/c500 drop` - List a new item in the marketplace";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Get your Stripe Connect onboarding link.
    #[poise::command(slash_command)]
    pub async fn setup(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.defer_ephemeral().await?;

        let discord_id = ctx.author().id.to_string();
        let result = ctx.data().api.stripe_onboarding_link(&discord_id).await;
        match &result {
            Ok(ApiOutcome::Success(_)) => info!("Onboarding link issued"),
            Ok(outcome) => warn!("Onboarding refused by Core API: {:?}", outcome),
            Err(e) => error!("Onboarding request failed: {e}"),
        }

        ctx.send(
            poise::CreateReply::default()
                .content(responses::onboarding_reply(&result))
                .ephemeral(true),
        )
        .await?;
        Ok(())
    }

    /// Create a new marketplace drop.
    #[poise::command(slash_command, rename = "drop", check = "is_verified_seller")]
    pub async fn create_drop(ctx: poise::ApplicationContext<'_, BotData, Error>) -> Result<()> {
        let form =
            poise::execute_modal(ctx, None::<drop_modal::DropForm>, Some(MODAL_TIMEOUT)).await?;

        match form {
            Some(form) => drop_modal::submit(poise::Context::Application(ctx), form).await,
            None => {
                info!("Drop form for {} timed out", ctx.interaction.user.id);
                Ok(())
            }
        }
    }
}

// Re-export all commands
pub use inner::*;
