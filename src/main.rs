mod config;
mod context;
mod day;
mod detector;
mod event;
mod handler;
mod health;
mod heartbeat;
mod helper;
mod ledger;
mod ledger_store;
mod logging;
mod plugin;
mod report;
mod roster;

use serenity::{all::GatewayIntents, Client};
use std::{sync::Arc, time::Duration};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = crate::config::Config::load().await?;
    let token = cfg.general.discord_token.clone();
    let target_channel = cfg.general.target_channel();
    let heartbeat_period = Duration::from_secs(cfg.attendance.heartbeat_seconds.max(1));

    let store = crate::ledger_store::LedgerStore::new(cfg.attendance.data_path.clone());
    log_internal!(
        "Storing submissions in `{}`",
        store.path().to_string_lossy()
    );
    let attendance =
        Arc::new(crate::ledger::Attendance::open(store, Arc::new(crate::day::LocalClock)).await);
    let handler = handler::Handler::new(cfg, attendance.clone());

    // Things we want discord to tell us about.
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&token, intents)
        .event_handler(handler)
        .await?;

    let cache = client.cache.clone();
    let heartbeat = crate::heartbeat::Heartbeat::new(attendance.clone());
    tokio::spawn(heartbeat.run(heartbeat_period, move || {
        target_channel.is_some_and(|id| crate::helper::channel_visible(&cache, id))
    }));

    tokio::select! {
        result = client.start() => result?,
        _ = tokio::signal::ctrl_c() => log_internal!("Interrupted, shutting down"),
    }

    attendance.close().await
}
