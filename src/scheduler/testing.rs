//! In-memory doubles for the store and the platform client.

use std::collections::HashSet;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::db::models::{ActionKind, DeferredAction};
use crate::scheduler::effect::ReversalClient;
use crate::scheduler::error::{EffectError, StoreError};
use crate::scheduler::store::ActionStore;

/// `ActionStore` backed by a `Vec`, with the same uniqueness and ordering
/// behavior as the real table. Reads for selected guilds can be made to
/// fail, to exercise the sweep's per-guild isolation.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<DeferredAction>>,
    failing_guilds: Mutex<HashSet<i64>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row directly, as if it had been written by a previous
    /// process run.
    pub async fn seed(
        &self,
        guild_id: i64,
        subject_id: i64,
        kind: ActionKind,
        expires_at: DateTime<Utc>,
        reason: Option<&str>,
    ) -> DeferredAction {
        self.insert(guild_id, subject_id, kind, expires_at, reason)
            .await
            .expect("seeding a fresh store cannot conflict")
    }

    pub fn fail_reads_for_guild(&self, guild_id: i64) {
        self.failing_guilds.lock().unwrap().insert(guild_id);
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.rows.lock().unwrap().iter().any(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn pending_for(&self, guild_id: i64, subject_id: i64) -> usize {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.guild_id == guild_id && r.subject_id == subject_id)
            .count()
    }

    fn unavailable() -> StoreError {
        StoreError::Database(sqlx::Error::PoolTimedOut)
    }
}

#[async_trait::async_trait]
impl ActionStore for MemoryStore {
    async fn insert(
        &self,
        guild_id: i64,
        subject_id: i64,
        kind: ActionKind,
        expires_at: DateTime<Utc>,
        reason: Option<&str>,
    ) -> Result<DeferredAction, StoreError> {
        let mut rows = self.rows.lock().unwrap();

        let duplicate = rows
            .iter()
            .any(|r| r.guild_id == guild_id && r.subject_id == subject_id && r.kind == kind);
        if duplicate {
            return Err(StoreError::DuplicatePending {
                guild_id,
                subject_id,
            });
        }

        let action = DeferredAction {
            id: Uuid::new_v4(),
            guild_id,
            subject_id,
            kind,
            reason: reason.map(str::to_owned),
            created_at: Utc::now(),
            expires_at,
        };
        rows.push(action.clone());

        Ok(action)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.rows.lock().unwrap().retain(|r| r.id != id);
        Ok(())
    }

    async fn delete_for_subject(
        &self,
        guild_id: i64,
        subject_id: i64,
        kind: ActionKind,
    ) -> Result<Vec<Uuid>, StoreError> {
        let mut rows = self.rows.lock().unwrap();

        let deleted: Vec<Uuid> = rows
            .iter()
            .filter(|r| r.guild_id == guild_id && r.subject_id == subject_id && r.kind == kind)
            .map(|r| r.id)
            .collect();
        rows.retain(|r| !deleted.contains(&r.id));

        Ok(deleted)
    }

    async fn expiring_before(
        &self,
        guild_id: i64,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<DeferredAction>, StoreError> {
        if self.failing_guilds.lock().unwrap().contains(&guild_id) {
            return Err(Self::unavailable());
        }

        let mut due: Vec<DeferredAction> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.guild_id == guild_id && r.expires_at <= cutoff)
            .cloned()
            .collect();
        due.sort_by_key(|r| r.expires_at);

        Ok(due)
    }

    async fn guilds_with_pending(&self, cutoff: DateTime<Utc>) -> Result<Vec<i64>, StoreError> {
        let mut guilds: Vec<i64> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.expires_at <= cutoff)
            .map(|r| r.guild_id)
            .collect();
        guilds.sort_unstable();
        guilds.dedup();

        Ok(guilds)
    }
}

/// `ReversalClient` that records each call and can be set up to fail.
#[derive(Default)]
pub struct RecordingClient {
    calls: Mutex<Vec<(i64, i64)>>,
    fail: bool,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn calls(&self) -> Vec<(i64, i64)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ReversalClient for RecordingClient {
    async fn apply_reversal(&self, guild_id: i64, subject_id: i64) -> Result<(), EffectError> {
        self.calls.lock().unwrap().push((guild_id, subject_id));

        if self.fail {
            Err(EffectError::MutedRoleNotConfigured(guild_id))
        } else {
            Ok(())
        }
    }
}
