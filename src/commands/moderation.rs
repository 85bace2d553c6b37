use std::time::Duration;

use poise::serenity_prelude::User;

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::constants::embeds;
use crate::constants::timing::MIN_MUTE_SECONDS;
use crate::services::moderation::mute_service;
use crate::utils::duration::{format_duration, parse_duration};

/// Temporarily mute a member
#[poise::command(
    slash_command,
    guild_only,
    required_permissions = "MANAGE_ROLES",
    required_bot_permissions = "MANAGE_ROLES"
)]
pub async fn mute(
    ctx: Context<'_>,
    #[description = "Member to mute"] user: User,
    #[description = "How long, e.g. 30m, 2h, 1d12h"] duration: String,
    #[description = "Reason for the mute"] reason: Option<String>,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    let parsed = parse_duration(&duration)
        .filter(|d| d >= &Duration::from_secs(MIN_MUTE_SECONDS))
        .ok_or_else(|| Error::InvalidDuration(duration.clone()))?;

    let outcome = mute_service::mute_member(
        ctx.http(),
        ctx.data(),
        guild_id,
        user.id,
        ctx.author().id,
        parsed,
        reason.as_deref(),
    )
    .await?;

    let mut description = format!(
        "<@{}> has been muted for {}.\nEnds <t:{}:R>.",
        user.id,
        format_duration(parsed),
        outcome.expires_at.timestamp()
    );
    if outcome.replaced {
        description.push_str("\nThe previous mute for this member was replaced.");
    }
    if let Some(reason) = &reason {
        description.push_str(&format!("\nReason: `{}`", reason));
    }

    let embed = embeds::success_embed().title("Member Muted").description(description);

    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}

/// Unmute a member early
#[poise::command(
    slash_command,
    guild_only,
    required_permissions = "MANAGE_ROLES",
    required_bot_permissions = "MANAGE_ROLES"
)]
pub async fn unmute(
    ctx: Context<'_>,
    #[description = "Member to unmute"] user: User,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    let was_pending =
        mute_service::unmute_member(ctx.http(), ctx.data(), guild_id, user.id).await?;

    let embed = if was_pending {
        embeds::success_embed()
            .title("Member Unmuted")
            .description(format!("<@{}> has been unmuted.", user.id))
    } else {
        embeds::info_embed().title("No Pending Mute").description(format!(
            "<@{}> had no scheduled unmute; the muted role was removed anyway.",
            user.id
        ))
    };

    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
