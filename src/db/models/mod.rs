mod deferred_action;
mod guild_config;

pub use deferred_action::{ActionKind, DeferredAction};
pub use guild_config::GuildConfig;
