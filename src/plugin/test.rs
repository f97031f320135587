use crate::{
    context::Context,
    event::Event,
    helper::ChannelIdHelper,
    plugin::{EventHandled, Plugin},
};
use anyhow::Result;
use serenity::all::CreateMessage;

/// Confirms the bot can read and answer in whatever channel it is asked from
pub struct PluginTest;

#[serenity::async_trait]
impl Plugin for PluginTest {
    fn name(&self) -> &'static str {
        "test"
    }

    async fn usage(&self, ctx: &Context) -> Option<String> {
        let cfg = ctx.cfg.read().await;
        Some(format!(
            "{}{} - check the bot is working in this channel",
            cfg.general.command_prefix,
            self.name()
        ))
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        let Some((msg, _)) = event.is_bot_cmd(ctx, self.name()).await else {
            return Ok(EventHandled::No);
        };

        let reply = format!("🤖 Bot is working! Channel ID: {}", msg.channel_id);
        msg.channel_id
            .send_or_log(ctx, CreateMessage::new().content(reply))
            .await?;
        Ok(EventHandled::Yes)
    }
}
