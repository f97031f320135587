//! Miscellaneous convenience methods

use crate::{context::Context, log_error, roster::Roster};
use anyhow::Result;
use serenity::all::{Cache, ChannelId, CreateMessage, GuildId, UserId};

/// Upper bound on members fetched over HTTP when a guild is not cached
const MEMBER_FETCH_LIMIT: u64 = 1000;

pub trait MessageHelper {
    fn is_from_admin(&self, ctx: &Context) -> bool;
}

impl MessageHelper for serenity::all::Message {
    fn is_from_admin(&self, ctx: &Context) -> bool {
        self.author_permissions(ctx.cache)
            .is_some_and(|permissions| permissions.administrator())
    }
}

#[serenity::async_trait]
pub trait ChannelIdHelper {
    /// Send, treating a permission-denied response as a logged no-op
    async fn send_or_log(&self, ctx: &Context, message: CreateMessage) -> Result<()>;
}

#[serenity::async_trait]
impl ChannelIdHelper for ChannelId {
    async fn send_or_log(&self, ctx: &Context, message: CreateMessage) -> Result<()> {
        match self.send_message(ctx.http, message).await {
            Ok(_) => Ok(()),
            Err(e) if is_permission_denied(&e) => {
                log_error!("Missing permission to send messages in channel {}", self);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn is_permission_denied(err: &serenity::Error) -> bool {
    matches!(
        err,
        serenity::Error::Http(e) if e.status_code().map(|status| status.as_u16()) == Some(403)
    )
}

/// Whether `channel_id` belongs to a guild currently in the cache
pub fn channel_visible(cache: &Cache, channel_id: ChannelId) -> bool {
    cache.guilds().into_iter().any(|guild_id| {
        cache
            .guild(guild_id)
            .is_some_and(|guild| guild.channels.contains_key(&channel_id))
    })
}

/// Member list for `guild_id`, from the cache when possible
pub async fn fetch_roster(ctx: &Context<'_>, guild_id: GuildId) -> Result<Roster> {
    let cached: Option<Roster> = guild_id
        .to_guild_cached(ctx.cache)
        .map(|guild| guild.members.values().collect());
    if let Some(roster) = cached {
        return Ok(roster);
    }

    let members = guild_id
        .members(ctx.http, Some(MEMBER_FETCH_LIMIT), None::<UserId>)
        .await?;
    Ok(members.iter().collect())
}
