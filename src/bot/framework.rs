use std::sync::Arc;

use poise::serenity_prelude::{self as serenity, GatewayIntents, GuildId};
use sqlx::PgPool;
use tracing::{error, info};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::commands;
use crate::config::Settings;
use crate::scheduler::{PgActionStore, Scheduler};
use crate::scheduler::sweeper;
use crate::services::moderation::role_client::RoleReversalClient;

pub async fn run(settings: Settings, pool: PgPool) -> Result<(), Error> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::setup::setup(),
                commands::moderation::mute(),
                commands::moderation::unmute(),
            ],
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: None, // Slash commands only
                ..Default::default()
            },
            on_error: |error| {
                Box::pin(async move {
                    match error {
                        poise::FrameworkError::Command { error, ctx, .. } => {
                            error!("Command error: {:?}", error);
                            let _ = ctx.say(format!("Error: {}", error)).await;
                        }
                        poise::FrameworkError::ArgumentParse { error, ctx, .. } => {
                            let _ = ctx.say(format!("Invalid argument: {}", error)).await;
                        }
                        poise::FrameworkError::UnknownCommand { .. } => {
                            // Bot only uses slash commands; ignore pings and prefixes
                        }
                        err => {
                            error!("Framework error: {:?}", err);
                        }
                    }
                })
            },
            ..Default::default()
        })
        .setup({
            let settings = settings.clone();
            let pool = pool.clone();
            move |ctx, ready, framework| {
                Box::pin(async move {
                    info!("Bot connected as {}", ready.user.name);

                    if let Some(guild_id) = settings.guild_id {
                        poise::builtins::register_in_guild(
                            ctx,
                            &framework.options().commands,
                            GuildId::new(guild_id),
                        )
                        .await?;
                        info!("Registered commands in guild {}", guild_id);
                    } else {
                        poise::builtins::register_globally(ctx, &framework.options().commands)
                            .await?;
                        info!("Registered commands globally");
                    }

                    // Wire the deferred-action core: durable store, the
                    // serenity-backed reversal effect, and the sweep task
                    // whose first pass rebuilds timers lost to the restart.
                    let store = Arc::new(PgActionStore::new(pool.clone()));
                    let client = Arc::new(RoleReversalClient::new(ctx.http.clone(), pool.clone()));
                    let scheduler = Scheduler::new(store, client, settings.sweep_period());

                    sweeper::spawn_sweeper(scheduler.clone(), settings.sweep_period());
                    info!("Started deferred-action sweeper");

                    Ok(Arc::new(Data::new(pool, settings, scheduler)))
                })
            }
        })
        .build();

    let intents = GatewayIntents::non_privileged() | GatewayIntents::GUILD_MEMBERS;

    let mut client = serenity::ClientBuilder::new(&settings.discord_token, intents)
        .framework(framework)
        .await?;

    client.start().await?;

    Ok(())
}
