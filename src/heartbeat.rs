//! Periodic tick that notices when the calendar day changes

use crate::{day::DayKey, ledger::Attendance, log_error, log_internal};
use anyhow::Result;
use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, Instant, MissedTickBehavior};

pub struct Heartbeat {
    attendance: Arc<Attendance>,
    last_day: DayKey,
}

/// What a single tick observed
#[derive(Debug, PartialEq, Eq)]
pub struct Beat {
    pub day: DayKey,
    pub rolled_over_from: Option<DayKey>,
    pub submissions_today: usize,
}

impl Heartbeat {
    pub fn new(attendance: Arc<Attendance>) -> Self {
        let last_day = attendance.today();
        Self {
            attendance,
            last_day,
        }
    }

    pub async fn tick(&mut self) -> Result<Beat> {
        let day = self.attendance.today();
        let mut rolled_over_from = None;

        if day != self.last_day {
            rolled_over_from = Some(self.last_day);
            self.last_day = day;
            self.attendance.start_day(day).await?;
        }

        Ok(Beat {
            day,
            rolled_over_from,
            submissions_today: self.attendance.get(&day).await.len(),
        })
    }

    /// Tick every `period` forever.  A failed tick is logged and retried on the next period.
    ///
    /// `channel_resolved` reports whether the target channel is currently visible to the bot.
    pub async fn run(mut self, period: Duration, channel_resolved: impl Fn() -> bool) {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            match self.tick().await {
                Ok(beat) => {
                    if let Some(previous) = beat.rolled_over_from {
                        log_internal!(
                            "Date changed {} -> {}. Starting new day tracking.",
                            previous,
                            beat.day
                        );
                    }
                    log_internal!(
                        "Heartbeat: day={} submissions_today={} channel_resolved={}",
                        beat.day,
                        beat.submissions_today,
                        if channel_resolved() { "yes" } else { "no" },
                    );
                }
                Err(e) => log_error!("Heartbeat error: {}", e),
            }
        }
    }
}
