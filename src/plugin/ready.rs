use crate::{
    context::Context,
    event::Event,
    helper::ChannelIdHelper,
    log_error, log_internal,
    plugin::{EventHandled, Plugin},
};
use anyhow::Result;
use serenity::all::CreateMessage;

const ONLINE_MESSAGE: &str =
    "👋 Bot online (diagnostic message). If you see this, messages should work.";

/// Starts day tracking and checks the target channel once the connection to Discord is ready.
pub struct PluginReady;

#[serenity::async_trait]
impl Plugin for PluginReady {
    fn name(&self) -> &'static str {
        "ready"
    }

    async fn usage(&self, _ctx: &Context) -> Option<String> {
        None
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        let Event::Ready(ready) = event else {
            return Ok(EventHandled::No);
        };

        for guild in &ready.guilds {
            log_internal!("Member of server {}", guild.id);
        }

        let today = ctx.attendance.ensure_today().await;
        log_internal!("Tracking submissions for {}", today);

        let cfg = ctx.cfg.read().await;
        let Some(channel_id) = cfg.general.target_channel() else {
            log_error!("CHANNEL_ID missing or invalid.  Submissions and reports are disabled.");
            return Ok(EventHandled::Yes);
        };
        let announce = cfg.attendance.announce_online;
        drop(cfg);

        // Checked even when announcements are off
        if let Err(e) = channel_id.to_channel(ctx.cache_http).await {
            log_error!(
                "Channel {} not found.  Double-check CHANNEL_ID and that the bot can view it: {}",
                channel_id,
                e
            );
            return Ok(EventHandled::Yes);
        }

        if announce {
            let message = CreateMessage::new().content(ONLINE_MESSAGE);
            if let Err(e) = channel_id.send_or_log(ctx, message).await {
                log_error!("Could not post to channel {}: {}", channel_id, e);
            }
        }

        Ok(EventHandled::Yes)
    }
}
