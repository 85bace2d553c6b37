use chrono::{DateTime, Utc};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct GuildConfig {
    pub guild_id: i64,
    pub muted_role_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GuildConfig {
    /// Check if temporary mutes can be used in this guild
    pub fn is_mute_configured(&self) -> bool {
        self.muted_role_id.is_some()
    }
}
