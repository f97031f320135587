use crate::{
    context::Context,
    event::Event,
    log_event,
    logging::*,
    plugin::{EventHandled, Plugin},
};
use anyhow::Result;

/// Prints information about each event to stdout
pub struct PluginLogEvents;

/// Longest message excerpt worth printing
const CONTENT_PREVIEW_CHARS: usize = 80;

#[serenity::async_trait]
impl Plugin for PluginLogEvents {
    fn name(&self) -> &'static str {
        "log_events"
    }

    async fn usage(&self, _ctx: &Context) -> Option<String> {
        None
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        match event {
            Event::Ready(ready) => {
                log_event!(
                    "Connected to {} server(s) as {}",
                    ready.guilds.len(),
                    ctx.cache.current_user().color(),
                );
            }
            Event::Message(msg) => {
                let preview: String = msg.content.chars().take(CONTENT_PREVIEW_CHARS).collect();
                log_event!(
                    "{}{}{}{}{}{} {:?}",
                    msg.guild_id.color(ctx.http).await,
                    Glue {}.color(),
                    msg.channel_id.color(ctx.http).await,
                    Glue {}.color(),
                    msg.author.color(),
                    Glue {}.color(),
                    preview,
                );
            }
            Event::GuildCreate { guild, is_new } => {
                if *is_new == Some(true) {
                    log_event!("Joined server {} ({})", guild.color(), guild.id);
                } else {
                    log_event!("Server available: {} ({})", guild.color(), guild.id);
                }
            }
            Event::Resume => log_event!("Session resumed"),
        }

        Ok(EventHandled::No)
    }
}
