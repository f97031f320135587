//! The Serenity crate we're using for the Discord API is designed around callbacks to handle
//! events.  However, this does not mesh well with our plugin framework here.  To resolve this,
//! `Handler` translates the callbacks into a distinct Event enum.

use crate::{context::Context, log_error, plugin::EventHandled};
use serenity::all::{Guild, Message, Ready};

/// A Discord event
pub enum Event {
    Ready(Ready),
    Message(Message),
    GuildCreate { guild: Guild, is_new: Option<bool> },
    Resume,
}

impl Event {
    /// Offer the event to each plugin in order until one claims it.  A failing plugin is logged
    /// and the event moves on, so one bad handler never takes the bot down.
    pub async fn handle(self, ctx: Context<'_>) {
        for plugin in crate::plugin::plugins() {
            match plugin.handle(&ctx, &self).await {
                Ok(EventHandled::Yes) => return,
                Ok(EventHandled::No) => continue,
                Err(err) => log_error!("Error in plugin {}: {:#}", plugin.name(), err),
            }
        }
    }

    /// Check if a message should be interpreted as a bot command, e.g. `!cmd foo bar`.  Returns
    /// the message and the words after the command.
    pub async fn is_bot_cmd<'a>(
        &'a self,
        ctx: &Context<'_>,
        cmd: &str,
    ) -> Option<(&'a Message, Vec<&'a str>)> {
        let Event::Message(msg) = self else {
            return None;
        };

        let mut words = msg.content.split_ascii_whitespace();
        let first = words.next()?;
        let cfg = ctx.cfg.read().await;
        let name = first.strip_prefix(cfg.general.command_prefix.as_str())?;

        (name == cmd).then(|| (msg, words.collect()))
    }
}
