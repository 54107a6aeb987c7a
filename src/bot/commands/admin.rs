//! Owner-only maintenance commands.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, responses::{self, ActivityKind}},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use tracing::{error, info, warn};

    /// Shuts the bot down.
    #[poise::command(slash_command, owners_only, hide_in_help)]
    pub async fn shutdown(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        warn!("Shutdown requested by {}", ctx.author().id);
        ctx.say("👋 Shutting down agent processes. Goodbye.").await?;
        ctx.framework().shard_manager().shutdown_all().await;
        Ok(())
    }

    /// Changes the bot's presence.
    #[poise::command(slash_command, owners_only, hide_in_help)]
    pub async fn setstatus(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "playing, watching or listening"] activity: String,
        #[description = "Status text"] message: String,
    ) -> Result<()> {
        let Some(kind) = ActivityKind::parse(&activity) else {
            ctx.say(responses::INVALID_ACTIVITY).await?;
            return Ok(());
        };

        let data = match kind {
            ActivityKind::Playing => serenity::ActivityData::playing(&message),
            ActivityKind::Watching => serenity::ActivityData::watching(&message),
            ActivityKind::Listening => serenity::ActivityData::listening(&message),
        };
        ctx.serenity_context().set_activity(Some(data));

        info!("Status set to {} {message}", kind.label());
        ctx.say(format!(
            "✅ Status updated to: **{} {message}**",
            kind.label()
        ))
        .await?;
        Ok(())
    }

    /// Makes the bot post a message in a channel.
    #[poise::command(slash_command, owners_only, hide_in_help)]
    pub async fn say(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Channel to post in"] channel: serenity::GuildChannel,
        #[description = "What to say"] message: String,
    ) -> Result<()> {
        let reply = match channel.say(ctx.http(), &message).await {
            Ok(_) => format!("✅ Message sent to <#{}>.", channel.id),
            Err(e) => {
                error!("Failed to send message to {}: {e}", channel.id);
                format!("❌ Failed to send message: {e}")
            }
        };

        ctx.send(poise::CreateReply::default().content(reply).ephemeral(true))
            .await?;
        Ok(())
    }

    /// Registers or removes application commands.
    #[poise::command(slash_command, owners_only, hide_in_help)]
    pub async fn register(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        poise::builtins::register_application_commands_buttons(ctx).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
