use std::sync::Arc;

use serenity::all::{GuildId, Http, RoleId, UserId};
use sqlx::PgPool;
use tracing::debug;

use crate::db::queries::guild_config;
use crate::scheduler::{EffectError, ReversalClient};

/// Serenity-backed reversal effect: take the configured muted role off the
/// subject. A thin adapter over the HTTP client rather than anything that
/// knows about the bot framework.
pub struct RoleReversalClient {
    http: Arc<Http>,
    pool: PgPool,
}

impl RoleReversalClient {
    pub fn new(http: Arc<Http>, pool: PgPool) -> Self {
        Self { http, pool }
    }
}

#[async_trait::async_trait]
impl ReversalClient for RoleReversalClient {
    async fn apply_reversal(&self, guild_id: i64, subject_id: i64) -> Result<(), EffectError> {
        let role_id = guild_config::get(&self.pool, guild_id)
            .await?
            .and_then(|c| c.muted_role_id)
            .ok_or(EffectError::MutedRoleNotConfigured(guild_id))?;

        self.http
            .remove_member_role(
                GuildId::new(guild_id as u64),
                UserId::new(subject_id as u64),
                RoleId::new(role_id as u64),
                Some("Temporary mute expired"),
            )
            .await?;

        debug!(
            "Removed muted role {} from user {} in guild {}",
            role_id, subject_id, guild_id
        );

        Ok(())
    }
}
