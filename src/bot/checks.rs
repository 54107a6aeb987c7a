//! Command checks.

use crate::{bot::Context, errors::Result};
use poise::serenity_prelude as serenity;

/// Passes when no seller role is configured, or when the author holds it.
///
/// A failed check is reported by the framework error handler, not here.
pub async fn is_verified_seller(ctx: Context<'_>) -> Result<bool> {
    let Some(role_id) = ctx.data().config.discord.seller_role_id else {
        return Ok(true);
    };

    let Some(member) = ctx.author_member().await else {
        tracing::debug!("Seller check outside a guild for {}", ctx.author().id);
        return Ok(false);
    };

    Ok(member.roles.contains(&serenity::RoleId::new(role_id)))
}
