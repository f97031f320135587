use crate::{
    context::Context,
    event::Event,
    plugin::{EventHandled, Plugin},
};
use anyhow::Result;

/// Swallows messages from bots, including our own, so they are never counted or obeyed
pub struct PluginIgnoreBots;

#[serenity::async_trait]
impl Plugin for PluginIgnoreBots {
    fn name(&self) -> &'static str {
        "ignore_bots"
    }

    async fn usage(&self, _ctx: &Context) -> Option<String> {
        None
    }

    async fn handle(&self, _ctx: &Context, event: &Event) -> Result<EventHandled> {
        let Event::Message(msg) = event else {
            return Ok(EventHandled::No);
        };

        if msg.author.bot {
            Ok(EventHandled::Yes)
        } else {
            Ok(EventHandled::No)
        }
    }
}
