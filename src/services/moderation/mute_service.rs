use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serenity::all::{GuildId, Http, RoleId, UserId};
use tracing::info;

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::db::models::ActionKind;
use crate::db::queries::guild_config;

/// Outcome of a mute, for the command reply.
pub struct MuteOutcome {
    pub expires_at: DateTime<Utc>,
    /// An earlier pending mute for this member was replaced
    pub replaced: bool,
}

/// Apply the muted role and schedule its removal.
pub async fn mute_member(
    http: &Http,
    data: &Arc<Data>,
    guild_id: GuildId,
    user_id: UserId,
    moderator_id: UserId,
    duration: Duration,
    reason: Option<&str>,
) -> Result<MuteOutcome, Error> {
    let role_id = muted_role(data, guild_id).await?;

    let audit_reason = format!(
        "Muted by {} for {}",
        moderator_id,
        reason.unwrap_or("no reason given")
    );
    http.add_member_role(guild_id, user_id, role_id, Some(&audit_reason))
        .await?;

    // Absurdly long durations are clamped rather than rejected
    let expires_at = Utc::now()
        + chrono::Duration::from_std(duration).unwrap_or_else(|_| chrono::Duration::days(36_500));

    let (_, replaced) = data
        .scheduler
        .schedule(
            guild_id.get() as i64,
            user_id.get() as i64,
            ActionKind::MuteExpiry,
            expires_at,
            reason,
        )
        .await?;

    info!(
        "User {} muted user {} in guild {} until {}",
        moderator_id, user_id, guild_id, expires_at
    );

    Ok(MuteOutcome {
        expires_at,
        replaced,
    })
}

/// Cancel the pending unmute and remove the muted role now.
///
/// Returns whether a mute was actually pending. The role is removed either
/// way, so a moderator can clean up a member who was muted by hand.
pub async fn unmute_member(
    http: &Http,
    data: &Arc<Data>,
    guild_id: GuildId,
    user_id: UserId,
) -> Result<bool, Error> {
    let role_id = muted_role(data, guild_id).await?;

    let cancelled = data
        .scheduler
        .cancel_pending(
            guild_id.get() as i64,
            user_id.get() as i64,
            ActionKind::MuteExpiry,
        )
        .await?;

    http.remove_member_role(guild_id, user_id, role_id, Some("Manual unmute"))
        .await?;

    if cancelled {
        info!("User {} unmuted early in guild {}", user_id, guild_id);
    }

    Ok(cancelled)
}

async fn muted_role(data: &Arc<Data>, guild_id: GuildId) -> Result<RoleId, Error> {
    let role_id = guild_config::get(&data.pool, guild_id.get() as i64)
        .await?
        .and_then(|c| c.muted_role_id)
        .ok_or(Error::MutedRoleNotConfigured)?;

    Ok(RoleId::new(role_id as u64))
}
