use std::env;
use std::time::Duration;

use crate::constants::timing::DEFAULT_SWEEP_PERIOD_SECONDS;

#[derive(Debug, Clone)]
pub struct Settings {
    pub discord_token: String,
    pub database_url: String,
    pub guild_id: Option<u64>,
    /// Reconciliation sweep period (also the arming look-ahead window)
    pub sweep_period_seconds: u64,
}

impl Settings {
    pub fn from_env() -> Result<Self, String> {
        let discord_token =
            env::var("DISCORD_TOKEN").map_err(|_| "DISCORD_TOKEN environment variable not set")?;

        let database_url =
            env::var("DATABASE_URL").map_err(|_| "DATABASE_URL environment variable not set")?;

        let guild_id = env::var("GUILD_ID").ok().and_then(|s| s.parse::<u64>().ok());

        let sweep_period_seconds = env::var("SWEEP_PERIOD_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_SWEEP_PERIOD_SECONDS);

        Ok(Self {
            discord_token,
            database_url,
            guild_id,
            sweep_period_seconds,
        })
    }

    pub fn sweep_period(&self) -> Duration {
        Duration::from_secs(self.sweep_period_seconds)
    }
}
