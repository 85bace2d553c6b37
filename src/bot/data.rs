use std::fmt;
use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Settings;
use crate::scheduler::Scheduler;

/// Shared data available to all commands and handlers
pub struct Data {
    pub pool: PgPool,
    pub settings: Settings,
    /// Deferred-action scheduler; one instance per process
    pub scheduler: Arc<Scheduler>,
}

impl Data {
    pub fn new(pool: PgPool, settings: Settings, scheduler: Arc<Scheduler>) -> Self {
        Self {
            pool,
            settings,
            scheduler,
        }
    }
}

impl fmt::Debug for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Data")
            .field("armed_timers", &self.scheduler.armed_count())
            .finish_non_exhaustive()
    }
}

pub type Context<'a> = poise::Context<'a, Arc<Data>, crate::bot::error::Error>;
