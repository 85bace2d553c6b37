//! Deferred moderation action scheduling.
//!
//! Temporary punishments (currently temp mutes) write a row to the durable
//! store and get reversed when it expires. Rows due soon are armed with an
//! in-memory timer; rows further out wait for the periodic sweep to arm
//! them, so a week-long mute never holds a live timer across a process that
//! may restart. The store is the source of truth; the timer set is rebuilt
//! from it on every sweep.

pub mod armed;
pub mod effect;
pub mod error;
pub mod executor;
pub mod store;
pub mod sweeper;

#[cfg(test)]
pub mod testing;

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::db::models::{ActionKind, DeferredAction};

pub use armed::ArmedTimers;
pub use effect::ReversalClient;
pub use error::{EffectError, StoreError};
pub use executor::Executor;
pub use store::{ActionStore, PgActionStore};

/// Owns the armed-timer set and the store/executor handles.
///
/// One instance exists per process, constructed at startup and passed by
/// `Arc` to the command surface and the sweep task.
pub struct Scheduler {
    store: Arc<dyn ActionStore>,
    executor: Arc<Executor>,
    armed: Arc<ArmedTimers>,
    look_ahead: Duration,
}

impl Scheduler {
    pub fn new(
        store: Arc<dyn ActionStore>,
        client: Arc<dyn ReversalClient>,
        look_ahead: Duration,
    ) -> Arc<Self> {
        let executor = Arc::new(Executor::new(store.clone(), client));

        Arc::new(Self {
            store,
            executor,
            armed: Arc::new(ArmedTimers::new()),
            look_ahead,
        })
    }

    /// Record a deferred action for a subject, replacing any pending action
    /// of the same kind for that subject (both the stored row and its timer,
    /// if armed). Actions due within the look-ahead window are armed
    /// immediately; the rest wait for a sweep.
    ///
    /// Returns the new action id and whether an earlier pending action was
    /// replaced.
    pub async fn schedule(
        &self,
        guild_id: i64,
        subject_id: i64,
        kind: ActionKind,
        expires_at: DateTime<Utc>,
        reason: Option<&str>,
    ) -> Result<(Uuid, bool), StoreError> {
        let replaced = self
            .store
            .delete_for_subject(guild_id, subject_id, kind)
            .await?;
        for id in &replaced {
            self.armed.cancel(*id);
        }

        let action = self
            .store
            .insert(guild_id, subject_id, kind, expires_at, reason)
            .await?;

        info!(
            "Scheduled {} {} for subject {} in guild {} (expires {}{})",
            kind,
            action.id,
            subject_id,
            guild_id,
            expires_at,
            if replaced.is_empty() {
                ""
            } else {
                ", replacing an earlier action"
            }
        );

        if expires_at <= Utc::now() + self.look_ahead_chrono() {
            self.arm(&action);
        }

        Ok((action.id, !replaced.is_empty()))
    }

    /// Cancel the pending action for a subject, if any. Returns whether
    /// anything was cancelled; cancelling a subject with nothing pending is
    /// not an error.
    pub async fn cancel_pending(
        &self,
        guild_id: i64,
        subject_id: i64,
        kind: ActionKind,
    ) -> Result<bool, StoreError> {
        let ids = self
            .store
            .delete_for_subject(guild_id, subject_id, kind)
            .await?;
        for id in &ids {
            self.armed.cancel(*id);
        }

        if !ids.is_empty() {
            info!(
                "Cancelled pending {} for subject {} in guild {}",
                kind, subject_id, guild_id
            );
        }

        Ok(!ids.is_empty())
    }

    /// Arm an in-memory timer for an action. Already-armed ids are left
    /// alone, so arming is idempotent and a timer can never fire twice for
    /// the same id. Past-due actions fire immediately.
    pub fn arm(&self, action: &DeferredAction) -> bool {
        let delay = (action.expires_at - Utc::now())
            .to_std()
            .unwrap_or(Duration::ZERO);

        let id = action.id;
        let action = action.clone();
        let executor = self.executor.clone();
        let armed = self.armed.clone();

        let newly_armed = self.armed.arm_with(id, move || {
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                executor.run(&action).await;
                // Handle cleanup happens whether the effect succeeded or
                // not; the store row, not the timer, carries any retry.
                armed.disarm(id);
            })
            .abort_handle()
        });

        if newly_armed {
            debug!("Armed action {} to fire in {:?}", id, delay);
        }

        newly_armed
    }

    /// One reconciliation pass: arm every stored action due within the
    /// look-ahead window. This is also the restart-recovery path; the first
    /// sweep after startup repopulates the timer set from the store.
    ///
    /// A failure reading one guild's actions skips that guild and continues
    /// with the rest.
    pub async fn sweep(&self) {
        let cutoff = Utc::now() + self.look_ahead_chrono();

        let guilds = match self.store.guilds_with_pending(cutoff).await {
            Ok(guilds) => guilds,
            Err(e) => {
                warn!("Sweep aborted, could not list guilds with pending actions: {}", e);
                return;
            }
        };

        for guild_id in guilds {
            match self.store.expiring_before(guild_id, cutoff).await {
                Ok(actions) => {
                    for action in &actions {
                        self.arm(action);
                    }
                }
                Err(e) => {
                    warn!(
                        "Sweep skipping guild {}: failed to read pending actions: {}",
                        guild_id, e
                    );
                }
            }
        }
    }

    fn look_ahead_chrono(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.look_ahead).unwrap_or_else(|_| chrono::Duration::zero())
    }

    /// Number of currently armed timers. Diagnostic only.
    pub fn armed_count(&self) -> usize {
        self.armed.len()
    }

    #[cfg(test)]
    fn is_armed(&self, id: Uuid) -> bool {
        self.armed.is_armed(id)
    }
}
