use crate::{
    config::Config,
    context::Context,
    event::Event,
    helper::{ChannelIdHelper, MessageHelper},
    ledger::Attendance,
    log_internal,
    plugin::{EventHandled, Plugin},
};
use anyhow::Result;
use serenity::all::{ChannelId, CreateMessage};

const CLEARED: &str = "🗑️ Cleared today's submission list.";
const DENIED: &str = "❌ You need administrator permissions to clear submissions.";

/// Empties today's submission list.  Administrators only.
pub struct PluginClearSubmissions;

#[derive(Debug, PartialEq, Eq)]
enum ClearDecision {
    /// Outside the target channel, or no target channel at all
    Ignore,
    Deny,
    Clear,
}

fn decide(cfg: &Config, channel_id: ChannelId, is_admin: bool) -> ClearDecision {
    if !cfg.answers_in(channel_id) {
        ClearDecision::Ignore
    } else if is_admin {
        ClearDecision::Clear
    } else {
        ClearDecision::Deny
    }
}

/// Carry out `decision`, returning the reply to post, if any
async fn apply(decision: ClearDecision, attendance: &Attendance) -> Option<&'static str> {
    match decision {
        ClearDecision::Ignore => None,
        ClearDecision::Deny => Some(DENIED),
        ClearDecision::Clear => {
            attendance.clear(attendance.today()).await;
            Some(CLEARED)
        }
    }
}

#[serenity::async_trait]
impl Plugin for PluginClearSubmissions {
    fn name(&self) -> &'static str {
        "clear_submissions"
    }

    async fn usage(&self, ctx: &Context) -> Option<String> {
        let cfg = ctx.cfg.read().await;
        Some(format!(
            "{}{} - clear today's submission list (administrators only)",
            cfg.general.command_prefix,
            self.name()
        ))
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        let Some((msg, _)) = event.is_bot_cmd(ctx, self.name()).await else {
            return Ok(EventHandled::No);
        };

        let decision = decide(
            &*ctx.cfg.read().await,
            msg.channel_id,
            msg.is_from_admin(ctx),
        );
        let cleared = decision == ClearDecision::Clear;
        let Some(reply) = apply(decision, ctx.attendance).await else {
            return Ok(EventHandled::Yes);
        };
        if cleared {
            log_internal!(
                "{} cleared submissions for {}",
                msg.author.name,
                ctx.attendance.today()
            );
        }

        msg.channel_id
            .send_or_log(ctx, CreateMessage::new().content(reply))
            .await?;
        Ok(EventHandled::Yes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{day::FixedClock, ledger_store::LedgerStore};
    use serenity::all::UserId;
    use std::sync::Arc;

    fn target() -> ChannelId {
        ChannelId::new(10)
    }

    fn config(channel_id: u64) -> Config {
        let mut cfg = Config::default();
        cfg.general.channel_id = channel_id;
        cfg
    }

    async fn attendance_with_one_submission(dir: &tempfile::TempDir) -> Attendance {
        let store = LedgerStore::new(dir.path().join("submissions_data.json"));
        let attendance = Attendance::open(store, Arc::new(FixedClock::new("2024-05-06"))).await;
        attendance.record(attendance.today(), UserId::new(7)).await;
        attendance
    }

    #[test]
    fn admin_in_target_channel_clears() {
        assert_eq!(decide(&config(10), target(), true), ClearDecision::Clear);
    }

    #[test]
    fn non_admin_is_denied() {
        assert_eq!(decide(&config(10), target(), false), ClearDecision::Deny);
    }

    #[test]
    fn other_channels_are_ignored() {
        assert_eq!(
            decide(&config(10), ChannelId::new(11), true),
            ClearDecision::Ignore
        );
    }

    #[test]
    fn unset_channel_ignores_even_admins() {
        assert_eq!(decide(&config(0), target(), true), ClearDecision::Ignore);
    }

    #[tokio::test]
    async fn denial_leaves_ledger_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let attendance = attendance_with_one_submission(&dir).await;

        let reply = apply(decide(&config(10), target(), false), &attendance).await;
        assert_eq!(reply, Some(DENIED));
        let today = attendance.today();
        assert_eq!(attendance.get(&today).await.len(), 1);
    }

    #[tokio::test]
    async fn ignored_command_is_silent_and_keeps_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let attendance = attendance_with_one_submission(&dir).await;

        let reply = apply(decide(&config(0), target(), true), &attendance).await;
        assert_eq!(reply, None);
        let today = attendance.today();
        assert_eq!(attendance.get(&today).await.len(), 1);
    }

    #[tokio::test]
    async fn admin_clear_empties_today() {
        let dir = tempfile::tempdir().unwrap();
        let attendance = attendance_with_one_submission(&dir).await;

        let reply = apply(decide(&config(10), target(), true), &attendance).await;
        assert_eq!(reply, Some(CLEARED));
        let today = attendance.today();
        assert!(attendance.get(&today).await.is_empty());
    }
}
