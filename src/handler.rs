use crate::{config::Config, context::Context, event::Event, ledger::Attendance};
use serenity::all::{Guild, Message, Ready, ResumedEvent};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Discord event handler
pub struct Handler {
    cfg: RwLock<Config>,
    attendance: Arc<Attendance>,
}

impl<'a> Handler {
    pub fn new(cfg: Config, attendance: Arc<Attendance>) -> Self {
        Self {
            cfg: RwLock::new(cfg),
            attendance,
        }
    }

    fn ctx(&'a self, discord_ctx: &'a serenity::all::Context) -> Context<'a> {
        Context {
            cfg: &self.cfg,
            attendance: &self.attendance,
            cache: &discord_ctx.cache,
            http: &discord_ctx.http,
            cache_http: discord_ctx,
        }
    }
}

#[serenity::async_trait]
impl serenity::all::EventHandler for Handler {
    async fn ready(&self, discord_ctx: serenity::all::Context, ready: Ready) {
        Event::Ready(ready).handle(self.ctx(&discord_ctx)).await;
    }

    async fn message(&self, discord_ctx: serenity::all::Context, msg: Message) {
        Event::Message(msg).handle(self.ctx(&discord_ctx)).await;
    }

    async fn guild_create(
        &self,
        discord_ctx: serenity::all::Context,
        guild: Guild,
        is_new: Option<bool>,
    ) {
        Event::GuildCreate { guild, is_new }
            .handle(self.ctx(&discord_ctx))
            .await;
    }

    async fn resume(&self, discord_ctx: serenity::all::Context, _: ResumedEvent) {
        Event::Resume.handle(self.ctx(&discord_ctx)).await;
    }
}
