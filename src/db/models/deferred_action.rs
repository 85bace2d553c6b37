use chrono::{DateTime, Utc};
use uuid::Uuid;

/// What a deferred action does when it fires.
///
/// Stored as text so new kinds (temp-ban expiry, etc.) can be added without
/// a schema migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    MuteExpiry,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::MuteExpiry => "mute_expiry",
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for ActionKind {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "mute_expiry" => Ok(ActionKind::MuteExpiry),
            other => Err(format!("unknown action kind: {}", other)),
        }
    }
}

/// A pending reversal of a temporary punishment.
///
/// Rows live in the `deferred_actions` table from the moment the punishment
/// is applied until the reversal fires or a moderator cancels it manually.
/// Whether an in-memory timer exists for a row is tracked by the scheduler,
/// never persisted.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DeferredAction {
    pub id: Uuid,
    pub guild_id: i64,
    pub subject_id: i64,
    #[sqlx(try_from = "String")]
    pub kind: ActionKind,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_text() {
        let kind = ActionKind::MuteExpiry;
        assert_eq!(
            ActionKind::try_from(kind.as_str().to_string()),
            Ok(ActionKind::MuteExpiry)
        );
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!(ActionKind::try_from("teleport".to_string()).is_err());
    }
}
