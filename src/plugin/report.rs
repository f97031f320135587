use crate::{
    context::Context,
    event::Event,
    helper::{fetch_roster, ChannelIdHelper},
    plugin::{EventHandled, Plugin},
    report,
};
use anyhow::Result;

/// Attendance report commands.  Only answered in the target channel.
pub enum PluginReport {
    Submitted,
    NotSubmitted,
    Daily,
}

#[serenity::async_trait]
impl Plugin for PluginReport {
    fn name(&self) -> &'static str {
        match self {
            PluginReport::Submitted => "submissions",
            PluginReport::NotSubmitted => "notsubmitted",
            PluginReport::Daily => "dailyreport",
        }
    }

    async fn usage(&self, ctx: &Context) -> Option<String> {
        let description = match self {
            PluginReport::Submitted => "who has submitted today",
            PluginReport::NotSubmitted => "who has not submitted today",
            PluginReport::Daily => "combined report for today",
        };
        let cfg = ctx.cfg.read().await;
        Some(format!(
            "{}{} - {}",
            cfg.general.command_prefix,
            self.name(),
            description
        ))
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        let Some((msg, _)) = event.is_bot_cmd(ctx, self.name()).await else {
            return Ok(EventHandled::No);
        };

        // Silently ignored elsewhere
        if !ctx.cfg.read().await.answers_in(msg.channel_id) {
            return Ok(EventHandled::Yes);
        }
        let Some(guild_id) = msg.guild_id else {
            return Ok(EventHandled::Yes);
        };

        let roster = fetch_roster(ctx, guild_id).await?;
        let day = ctx.attendance.today();
        let split = ctx.attendance.partition(&day, &roster).await;
        let resolve = |id| roster.display_name(id).map(str::to_owned);

        let report = match self {
            PluginReport::Submitted => report::submitted(&split, resolve),
            PluginReport::NotSubmitted => report::not_submitted(&split, resolve),
            PluginReport::Daily => report::daily(&day, &split, resolve),
        };

        msg.channel_id
            .send_or_log(ctx, report.to_message())
            .await?;
        Ok(EventHandled::Yes)
    }
}
