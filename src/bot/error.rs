use thiserror::Error;

use crate::scheduler::StoreError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Discord API error: {0}")]
    Serenity(#[from] serenity::Error),

    #[error("Scheduler error: {0}")]
    Store(#[from] StoreError),

    #[error("The muted role is not configured for this guild. Use `/setup muted-role` first.")]
    MutedRoleNotConfigured,

    #[error("Invalid duration `{0}`. Use specifiers like `30m`, `2h`, or `1d12h`.")]
    InvalidDuration(String),

    #[error("{0}")]
    Custom(String),
}

impl Error {
    pub fn custom<S: Into<String>>(msg: S) -> Self {
        Error::Custom(msg.into())
    }
}
