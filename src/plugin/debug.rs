use crate::{
    context::Context,
    event::Event,
    helper::ChannelIdHelper,
    plugin::{EventHandled, Plugin},
};
use anyhow::Result;
use serenity::all::{CreateEmbed, CreateMessage};

/// Shows what the bot knows about where it is being asked from
pub struct PluginDebug;

#[serenity::async_trait]
impl Plugin for PluginDebug {
    fn name(&self) -> &'static str {
        "debug"
    }

    async fn usage(&self, ctx: &Context) -> Option<String> {
        let cfg = ctx.cfg.read().await;
        Some(format!(
            "{}{} - show debug information about the bot",
            cfg.general.command_prefix,
            self.name()
        ))
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        let Some((msg, _)) = event.is_bot_cmd(ctx, self.name()).await else {
            return Ok(EventHandled::No);
        };

        let bot_name = ctx.cache.current_user().name.clone();
        let channel_name = msg
            .channel_id
            .name(ctx.cache_http)
            .await
            .unwrap_or_else(|_| "<unknown-channel>".to_owned());
        let guild_name = msg
            .guild(ctx.cache)
            .map(|guild| guild.name.clone())
            .unwrap_or_else(|| "<direct-message>".to_owned());
        let guild_id = msg
            .guild_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_owned());
        let target_channel = ctx.cfg.read().await.general.channel_id;

        let embed = CreateEmbed::new()
            .title("🔧 Bot Debug Info")
            .colour(0x00FF00_u32)
            .field("Bot User", bot_name, true)
            .field(
                "Current Channel",
                format!("{} ({})", channel_name, msg.channel_id),
                true,
            )
            .field(
                "Current Server",
                format!("{} ({})", guild_name, guild_id),
                true,
            )
            .field("Target Channel ID", target_channel.to_string(), true)
            .field("Tracking Day", ctx.attendance.today().to_string(), true)
            .field("Connected Servers", ctx.cache.guilds().len().to_string(), true);

        msg.channel_id
            .send_or_log(ctx, CreateMessage::new().embed(embed))
            .await?;
        Ok(EventHandled::Yes)
    }
}
