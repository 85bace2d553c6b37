pub mod deferred_action;
pub mod guild_config;
