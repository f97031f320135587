use crate::{
    context::Context,
    event::Event,
    health,
    helper::ChannelIdHelper,
    plugin::{EventHandled, Plugin},
};
use anyhow::{anyhow, Result};
use serenity::all::CreateMessage;

/// Reports the health snapshot as JSON
pub struct PluginHealth;

#[serenity::async_trait]
impl Plugin for PluginHealth {
    fn name(&self) -> &'static str {
        "health"
    }

    async fn usage(&self, ctx: &Context) -> Option<String> {
        let cfg = ctx.cfg.read().await;
        Some(format!(
            "{}{} - show bot status",
            cfg.general.command_prefix,
            self.name()
        ))
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        let Some((msg, _)) = event.is_bot_cmd(ctx, self.name()).await else {
            return Ok(EventHandled::No);
        };

        let channel_id = ctx.cfg.read().await.general.channel_id;
        let snapshot =
            health::Health::snapshot(ctx.cache.guilds().len(), channel_id, ctx.attendance.today());
        let json = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| anyhow!("Could not serialize health snapshot: {}", e))?;

        msg.channel_id
            .send_or_log(
                ctx,
                CreateMessage::new().content(format!("```json\n{}\n```", json)),
            )
            .await?;
        Ok(EventHandled::Yes)
    }
}
