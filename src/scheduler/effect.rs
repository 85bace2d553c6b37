use crate::scheduler::error::EffectError;

/// The platform capability the executor consumes: undo the real-world side
/// of a punishment (for mute expiry, take the muted role off the subject).
///
/// Implementations must be idempotent; the effect can fire for a subject who
/// was already unmuted by hand, and removing a role the member no longer has
/// is a harmless no-op on Discord's side.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ReversalClient: Send + Sync {
    async fn apply_reversal(&self, guild_id: i64, subject_id: i64) -> Result<(), EffectError>;
}
