use crate::{context::Context, event::Event};
use anyhow::Result;

mod clear;
mod debug;
mod health;
mod help;
mod ignore_bots;
mod log_events;
mod ready;
mod report;
mod submission;
mod test;

#[serenity::async_trait]
pub trait Plugin: Sync + Send {
    /// Plugin name.  Doubles as the command name for command plugins
    fn name(&self) -> &'static str;
    /// Help message line.  None if no help message
    async fn usage(&self, ctx: &Context) -> Option<String>;
    /// Potentially handle event.  Returns:
    /// - Ok(EventHandled::Yes) if the event has been handled and no other plugin should attempt to
    /// handle it
    /// - Ok(EventHandled::No) if another plugin should attempt to handle the event
    /// - Err if an error occurred
    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled>;
}

pub enum EventHandled {
    Yes,
    No,
}

/// Ordered list of available plugins
pub fn plugins() -> Vec<Box<dyn Plugin>> {
    vec![
        // Core bot operations
        Box::new(log_events::PluginLogEvents),
        Box::new(ready::PluginReady),
        Box::new(ignore_bots::PluginIgnoreBots),
        // Must see every message, so it runs before any command claims one
        Box::new(submission::PluginSubmission),
        // Commands
        Box::new(help::PluginHelp),
        Box::new(report::PluginReport::Submitted),
        Box::new(report::PluginReport::NotSubmitted),
        Box::new(report::PluginReport::Daily),
        Box::new(clear::PluginClearSubmissions),
        Box::new(test::PluginTest),
        Box::new(debug::PluginDebug),
        Box::new(health::PluginHealth),
    ]
}
