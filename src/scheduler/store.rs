use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{ActionKind, DeferredAction};
use crate::db::queries::deferred_action;
use crate::scheduler::error::StoreError;

/// Durable storage for pending deferred actions.
///
/// The store is the single source of truth: the scheduler's armed-timer set
/// is rebuilt from it after every restart. All operations are independently
/// retryable (deletes are idempotent, reads are pure).
#[async_trait::async_trait]
pub trait ActionStore: Send + Sync {
    async fn insert(
        &self,
        guild_id: i64,
        subject_id: i64,
        kind: ActionKind,
        expires_at: DateTime<Utc>,
        reason: Option<&str>,
    ) -> Result<DeferredAction, StoreError>;

    /// Remove one action by id. Not an error if the row is already gone.
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;

    /// Remove every pending action for `(guild, subject, kind)`, returning
    /// the deleted ids so the caller can cancel their timers.
    async fn delete_for_subject(
        &self,
        guild_id: i64,
        subject_id: i64,
        kind: ActionKind,
    ) -> Result<Vec<Uuid>, StoreError>;

    /// Actions for one guild due at or before `cutoff`, earliest first.
    async fn expiring_before(
        &self,
        guild_id: i64,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<DeferredAction>, StoreError>;

    /// Guilds with at least one action due at or before `cutoff`.
    async fn guilds_with_pending(&self, cutoff: DateTime<Utc>) -> Result<Vec<i64>, StoreError>;
}

/// Postgres-backed store over the `deferred_actions` table.
pub struct PgActionStore {
    pool: PgPool,
}

impl PgActionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_insert_error(e: sqlx::Error, guild_id: i64, subject_id: i64) -> StoreError {
        let is_unique = e
            .as_database_error()
            .is_some_and(|db| db.is_unique_violation());

        if is_unique {
            StoreError::DuplicatePending {
                guild_id,
                subject_id,
            }
        } else {
            StoreError::Database(e)
        }
    }
}

#[async_trait::async_trait]
impl ActionStore for PgActionStore {
    async fn insert(
        &self,
        guild_id: i64,
        subject_id: i64,
        kind: ActionKind,
        expires_at: DateTime<Utc>,
        reason: Option<&str>,
    ) -> Result<DeferredAction, StoreError> {
        deferred_action::create(&self.pool, guild_id, subject_id, kind, expires_at, reason)
            .await
            .map_err(|e| Self::map_insert_error(e, guild_id, subject_id))
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        deferred_action::delete(&self.pool, id).await?;
        Ok(())
    }

    async fn delete_for_subject(
        &self,
        guild_id: i64,
        subject_id: i64,
        kind: ActionKind,
    ) -> Result<Vec<Uuid>, StoreError> {
        Ok(deferred_action::delete_for_subject(&self.pool, guild_id, subject_id, kind).await?)
    }

    async fn expiring_before(
        &self,
        guild_id: i64,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<DeferredAction>, StoreError> {
        Ok(deferred_action::expiring_before(&self.pool, guild_id, cutoff).await?)
    }

    async fn guilds_with_pending(&self, cutoff: DateTime<Utc>) -> Result<Vec<i64>, StoreError> {
        Ok(deferred_action::guilds_with_pending(&self.pool, cutoff).await?)
    }
}
