use poise::serenity_prelude::Role;

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::constants::embeds;
use crate::db::queries::guild_config;

/// Setup commands for configuring the bot
#[poise::command(
    slash_command,
    subcommands("muted_role", "show"),
    required_permissions = "ADMINISTRATOR",
    guild_only
)]
pub async fn setup(ctx: Context<'_>) -> Result<(), Error> {
    ctx.say("Use one of the subcommands: `/setup muted-role`, `/setup show`")
        .await?;
    Ok(())
}

/// Set the role applied to muted members
#[poise::command(slash_command, rename = "muted-role", guild_only)]
pub async fn muted_role(
    ctx: Context<'_>,
    #[description = "Role to apply to muted members"] role: Role,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    guild_config::set_muted_role(&ctx.data().pool, guild_id.get() as i64, role.id.get() as i64)
        .await?;

    let embed = embeds::success_embed()
        .title("Muted Role Set")
        .description(format!("Muted members will receive <@&{}>.", role.id));

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

/// Show the current configuration
#[poise::command(slash_command, guild_only)]
pub async fn show(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    let config = guild_config::get(&ctx.data().pool, guild_id.get() as i64).await?;

    let muted_role = config
        .and_then(|c| c.muted_role_id)
        .map(|id| format!("<@&{}>", id))
        .unwrap_or_else(|| "not set".to_string());

    let embed = embeds::standard_embed()
        .title("Warden Configuration")
        .field("Muted role", muted_role, false)
        .field(
            "Sweep period",
            format!("{} seconds", ctx.data().settings.sweep_period_seconds),
            false,
        )
        .field(
            "Armed timers",
            ctx.data().scheduler.armed_count().to_string(),
            false,
        );

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}
