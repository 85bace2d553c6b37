use std::sync::Arc;
use std::time::Duration;

use tokio::time::interval;
use tracing::info;

use crate::scheduler::Scheduler;

/// Start the periodic reconciliation sweep.
///
/// The first tick fires immediately, so after a restart the timer set is
/// rebuilt from the store as soon as the bot is up. The sweeper only arms
/// timers; it never executes or deletes actions itself.
pub fn spawn_sweeper(scheduler: Arc<Scheduler>, period: Duration) {
    info!("Starting reconciliation sweeper with {:?} period", period);

    tokio::spawn(async move {
        let mut ticker = interval(period);

        loop {
            ticker.tick().await;
            scheduler.sweep().await;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;

    use crate::db::models::ActionKind;
    use crate::scheduler::testing::{MemoryStore, RecordingClient};

    #[tokio::test(start_paused = true)]
    async fn sweeper_arms_and_fires_without_any_direct_scheduling() {
        let store = Arc::new(MemoryStore::new());
        let action = store
            .seed(
                1,
                2,
                ActionKind::MuteExpiry,
                Utc::now() + chrono::Duration::minutes(5),
                Some("restart recovery"),
            )
            .await;

        let client = Arc::new(RecordingClient::new());
        let scheduler = Scheduler::new(store.clone(), client.clone(), Duration::from_secs(15 * 60));

        spawn_sweeper(scheduler.clone(), Duration::from_secs(15 * 60));

        // First tick is immediate; let it run, then ride past the expiry.
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(scheduler.armed_count(), 1);

        tokio::time::sleep(Duration::from_secs(5 * 60 + 1)).await;
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }

        assert_eq!(client.calls(), vec![(1, 2)]);
        assert!(!store.contains(action.id));
    }
}
