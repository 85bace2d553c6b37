use thiserror::Error;

/// Errors from the durable action store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("subject {subject_id} in guild {guild_id} already has a pending action of this kind")]
    DuplicatePending { guild_id: i64, subject_id: i64 },
}

/// Errors from applying a reversal effect on the platform.
///
/// These are logged by the executor and never propagate; a failed effect
/// does not block retiring the action from the store.
#[derive(Debug, Error)]
pub enum EffectError {
    #[error("platform error: {0}")]
    Platform(#[from] serenity::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("muted role is not configured for guild {0}")]
    MutedRoleNotConfigured(i64),
}
