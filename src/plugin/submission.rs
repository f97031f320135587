use crate::{
    context::Context,
    detector::{self, Candidate, Detection},
    event::Event,
    helper::ChannelIdHelper,
    log_internal,
    plugin::{EventHandled, Plugin},
};
use anyhow::Result;
use serenity::all::{CreateMessage, Mentionable};

/// Records the author of any message carrying a spreadsheet
pub struct PluginSubmission;

#[serenity::async_trait]
impl Plugin for PluginSubmission {
    fn name(&self) -> &'static str {
        "submission"
    }

    async fn usage(&self, _ctx: &Context) -> Option<String> {
        None
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        let Event::Message(msg) = event else {
            return Ok(EventHandled::No);
        };

        if !ctx.cfg.read().await.watches(msg.channel_id) {
            return Ok(EventHandled::No);
        }

        let candidate = Candidate::from(msg);
        match detector::classify(&candidate) {
            Some(Detection::Attachment(filename)) => {
                log_internal!("Spreadsheet attachment detected: {}", filename)
            }
            Some(Detection::Link(link)) => log_internal!("Spreadsheet link detected: {}", link),
            None => return Ok(EventHandled::No),
        }

        let today = ctx.attendance.today();
        if ctx.attendance.record(today, msg.author.id).await {
            log_internal!("Recorded submission from {} for {}", msg.author.name, today);
        }

        let confirmation = format!("✅ Spreadsheet received from {}", msg.author.mention());
        msg.channel_id
            .send_or_log(ctx, CreateMessage::new().content(confirmation))
            .await?;

        // A command may share the message, so let the command plugins look too
        Ok(EventHandled::No)
    }
}
