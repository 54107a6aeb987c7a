//! General Discord commands - ping, uptime, server and user info, listings and help.
//! This module contains commands that don't write anything and provide basic
//! bot functionality and user assistance.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, embeds, responses},
        core::api::{ApiOutcome, Product},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use std::time::Instant;
    use tracing::error;

    /// Discord allows at most this many fields per embed.
    const MAX_EMBED_FIELDS: usize = 25;

    fn discord_date(timestamp: serenity::Timestamp) -> String {
        format!("<t:{}:D>", timestamp.unix_timestamp())
    }

    /// Checks bot latency and whether the Core API is up.
    #[poise::command(slash_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let started = Instant::now();
        let handle = ctx.say("🏓 Pong!").await?;
        let round_trip = started.elapsed();

        let gateway = ctx.ping().await;
        let core_api = match ctx.data().api.health().await {
            Ok(true) => "🟢 online",
            Ok(false) => "🟠 degraded",
            Err(e) => {
                error!("Core API health check failed: {e}");
                "🔴 unreachable"
            }
        };

        let content = format!(
            "🏓 **Pong!**\nMessage: `{}ms`\nGateway: `{}ms`\nCore API: {core_api}",
            round_trip.as_millis(),
            gateway.as_millis()
        );
        handle
            .edit(ctx, poise::CreateReply::default().content(content))
            .await?;
        Ok(())
    }

    /// Shows how long the bot has been running.
    #[poise::command(slash_command)]
    pub async fn uptime(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let elapsed = responses::format_uptime(ctx.data().started_at.elapsed());
        ctx.say(format!("⏱️ **Uptime:** {elapsed}")).await?;
        Ok(())
    }

    /// About the C500 bot.
    #[poise::command(slash_command)]
    pub async fn about(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let embed = serenity::CreateEmbed::default()
            .title("🌸 C500 Collective Bot")
            .description("Marketplace drops, checkout and fulfillment for C500 builders.")
            .color(embeds::COLOR_PRIMARY)
            .field("Library", "poise + serenity", true)
            .field("Version", env!("CARGO_PKG_VERSION"), true)
            .field(
                "Uptime",
                responses::format_uptime(ctx.data().started_at.elapsed()),
                true,
            )
            .footer(serenity::CreateEmbedFooter::new(embeds::FOOTER_TEXT));

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Shows information about this server.
    #[poise::command(slash_command, guild_only)]
    pub async fn serverinfo(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        // The cache guard is not Send, so the embed is built before any await.
        let embed = ctx.guild().map(|guild| {
            let text_channels = guild
                .channels
                .values()
                .filter(|c| c.kind == serenity::ChannelType::Text)
                .count();
            let voice_channels = guild
                .channels
                .values()
                .filter(|c| c.kind == serenity::ChannelType::Voice)
                .count();

            let mut embed = serenity::CreateEmbed::default()
                .title(format!("📊 {}", guild.name))
                .color(embeds::COLOR_SECONDARY)
                .field("Server ID", guild.id.to_string(), true)
                .field("Owner", format!("<@{}>", guild.owner_id), true)
                .field("Members", guild.member_count.to_string(), true)
                .field("Roles", guild.roles.len().to_string(), true)
                .field("Text Channels", text_channels.to_string(), true)
                .field("Voice Channels", voice_channels.to_string(), true)
                .field("Created", discord_date(guild.id.created_at()), false);
            if let Some(icon) = guild.icon_url() {
                embed = embed.thumbnail(icon);
            }
            embed
        });

        match embed {
            Some(embed) => ctx.send(poise::CreateReply::default().embed(embed)).await?,
            None => ctx.say("❌ I couldn't load this server's details.").await?,
        };
        Ok(())
    }

    /// Shows information about a member (defaults to you).
    #[poise::command(slash_command, guild_only)]
    pub async fn userinfo(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Member to look up"] member: Option<serenity::Member>,
    ) -> Result<()> {
        let member = match member {
            Some(member) => member,
            None => match ctx.author_member().await {
                Some(member) => member.into_owned(),
                None => {
                    ctx.say("❌ I couldn't load your member details.").await?;
                    return Ok(());
                }
            },
        };

        let roles: Vec<String> = member.roles.iter().map(|id| format!("<@&{id}>")).collect();
        let joined = member
            .joined_at
            .map_or_else(|| "Unknown".to_string(), discord_date);

        let embed = serenity::CreateEmbed::default()
            .title(format!("👤 {}", member.display_name()))
            .color(embeds::COLOR_SECONDARY)
            .thumbnail(member.face())
            .field("User ID", member.user.id.to_string(), true)
            .field("Username", member.user.name.clone(), true)
            .field("Joined", joined, true)
            .field("Created", discord_date(member.user.id.created_at()), true)
            .field(
                format!("Roles ({})", roles.len()),
                responses::format_role_list(&roles),
                false,
            );

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    fn listings_embed(products: &[Product]) -> serenity::CreateEmbed {
        let mut embed = serenity::CreateEmbed::default()
            .title("🛍️ Active Listings")
            .color(embeds::COLOR_PRIMARY)
            .footer(serenity::CreateEmbedFooter::new(embeds::FOOTER_TEXT));

        if products.is_empty() {
            return embed.description("No active listings right now. Check back soon!");
        }

        for product in products.iter().take(MAX_EMBED_FIELDS) {
            let mut value = format!("**${:.2}** · ID `{}`", product.price, product.id);
            if !product.description.is_empty() {
                value.push('\n');
                value.push_str(&product.description);
            }
            embed = embed.field(&product.name, value, false);
        }
        embed
    }

    /// Lists the products currently for sale.
    #[poise::command(slash_command)]
    pub async fn listings(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.defer().await?;

        let embed = match ctx.data().api.list_products().await {
            Ok(ApiOutcome::Success(products)) => listings_embed(&products),
            Ok(outcome) => {
                error!("Product listing failed: {:?}", outcome);
                embeds::error_embed("The marketplace is unavailable right now.", None)
            }
            Err(e) => {
                error!("Product listing request failed: {e}");
                embeds::error_embed(
                    "Could not reach the C500 Core API. Try again later.",
                    Some("Connection Error"),
                )
            }
        };

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**C500 Bot Help**\n\
        Here is a summary of all available commands.\n\n\
        **Seller Commands**\n\
        • `/c500 setup` - Connect your Stripe account to get paid.\n\
        • `/c500 drop` - List a new item in the marketplace.\n\
        • `/fulfill ship <order_id> <tracking_number> <carrier>` - Submit tracking for a shipment.\n\
        • `/fulfill live <order_id> <vod_url>` - Submit a stream VOD for a live delivery.\n\n\
        **General Commands**\n\
        • `/listings` - Shows active marketplace listings.\n\
        • `/serverinfo`, `/userinfo [member]` - Server and member details.\n\
        • `/ping`, `/uptime`, `/about` - Bot status.\n\
        • `/help` - Shows this help message.\n\n\
        Buyers just click **Buy Now** on any drop to check out.";

        ctx.say(help_text).await?;
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        #![allow(clippy::unwrap_used)]
        use super::*;
        use crate::core::api::ProductId;

        #[test]
        fn test_listings_embed() {
            let products = vec![Product {
                id: ProductId::Number(7),
                name: "Snowy TKL".to_string(),
                price: 450.0,
                description: "Lubed".to_string(),
            }];
            let json = serde_json::to_value(listings_embed(&products)).unwrap();
            assert_eq!(json["fields"][0]["name"], "Snowy TKL");
            assert_eq!(json["fields"][0]["value"], "**$450.00** · ID `7`\nLubed");

            let empty = serde_json::to_value(listings_embed(&[])).unwrap();
            assert!(empty["description"].as_str().unwrap().starts_with("No active listings"));
        }
    }
}

// Re-export all commands
pub use inner::*;
