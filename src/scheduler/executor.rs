use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::db::models::DeferredAction;
use crate::scheduler::effect::ReversalClient;
use crate::scheduler::store::ActionStore;

/// Applies the real-world effect of an expired action and retires its row.
pub struct Executor {
    store: Arc<dyn ActionStore>,
    client: Arc<dyn ReversalClient>,
}

impl Executor {
    pub fn new(store: Arc<dyn ActionStore>, client: Arc<dyn ReversalClient>) -> Self {
        Self { store, client }
    }

    /// Run an expired action: one attempt at the platform effect, then
    /// delete the row whether or not the effect succeeded. A subject who
    /// left the guild or a lost permission must not keep the row (and a
    /// timer for it) alive forever; a moderator can re-apply by hand.
    ///
    /// If the delete itself fails the row stays pending and past due, so the
    /// next sweep picks it up again.
    pub async fn run(&self, action: &DeferredAction) {
        if let Err(e) = self
            .client
            .apply_reversal(action.guild_id, action.subject_id)
            .await
        {
            warn!(
                "Failed to reverse {} for subject {} in guild {}: {}",
                action.kind, action.subject_id, action.guild_id, e
            );
        }

        match self.store.delete(action.id).await {
            Ok(()) => {
                debug!(
                    "Retired {} {} for subject {} in guild {}",
                    action.kind, action.id, action.subject_id, action.guild_id
                );
            }
            Err(e) => {
                error!(
                    "Failed to retire action {} from the store: {} (will retry on next sweep)",
                    action.id, e
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;
    use mockall::predicate::eq;
    use uuid::Uuid;

    use crate::db::models::ActionKind;
    use crate::scheduler::effect::MockReversalClient;
    use crate::scheduler::error::EffectError;
    use crate::scheduler::testing::MemoryStore;

    fn action(store_id: Uuid, guild_id: i64, subject_id: i64) -> DeferredAction {
        DeferredAction {
            id: store_id,
            guild_id,
            subject_id,
            kind: ActionKind::MuteExpiry,
            reason: None,
            created_at: Utc::now(),
            expires_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn successful_effect_retires_the_row() {
        let store = Arc::new(MemoryStore::new());
        let row = store
            .seed(10, 20, ActionKind::MuteExpiry, Utc::now(), None)
            .await;

        let mut client = MockReversalClient::new();
        client
            .expect_apply_reversal()
            .with(eq(10), eq(20))
            .times(1)
            .returning(|_, _| Ok(()));

        let executor = Executor::new(store.clone(), Arc::new(client));
        executor.run(&row).await;

        assert!(!store.contains(row.id));
    }

    #[tokio::test]
    async fn failed_effect_still_retires_the_row() {
        let store = Arc::new(MemoryStore::new());
        let row = store
            .seed(10, 20, ActionKind::MuteExpiry, Utc::now(), None)
            .await;

        let mut client = MockReversalClient::new();
        client
            .expect_apply_reversal()
            .times(1)
            .returning(|guild_id, _| Err(EffectError::MutedRoleNotConfigured(guild_id)));

        let executor = Executor::new(store.clone(), Arc::new(client));
        executor.run(&row).await;

        // The mute stays applied on the platform, but the record must not
        // linger and become a permanently re-armed zombie.
        assert!(!store.contains(row.id));
    }

    #[tokio::test]
    async fn retiring_an_already_deleted_row_is_quiet() {
        let store = Arc::new(MemoryStore::new());

        let mut client = MockReversalClient::new();
        client
            .expect_apply_reversal()
            .times(1)
            .returning(|_, _| Ok(()));

        let executor = Executor::new(store.clone(), Arc::new(client));
        executor.run(&action(Uuid::new_v4(), 1, 2)).await;
    }
}
