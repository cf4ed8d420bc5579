//! Hourly reminder timer
//!
//! Sleeps until the configured minute of the next hour (in a fixed UTC
//! offset) and hands each tick to the dispatcher on its own task, so a slow
//! broadcast never delays the next tick or inbound message handling.
//!
//! - **Version**: 1.2.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.2.0: At most one broadcast per hour slot across clock adjustments
//! - 1.1.0: Optional active hours window
//! - 1.0.0: Initial release, top of every hour

use super::dispatcher::ReminderDispatcher;
use crate::core::{ActiveHours, Config};
use chrono::{DateTime, FixedOffset, Timelike, Utc};
use log::{debug, info};
use std::sync::Arc;
use std::time::Duration;

const HOUR_MS: i64 = 60 * 60 * 1000;

/// Time from `now` until the next `hh:minute:00` boundary.
///
/// When `now` sits exactly on a boundary the following one is returned, so
/// a tick that wakes on time is never fired twice.
pub fn delay_until_next_tick(now: DateTime<FixedOffset>, minute: u32) -> Duration {
    let into_hour_ms = i64::from(now.minute()) * 60_000
        + i64::from(now.second()) * 1_000
        + i64::from(now.nanosecond() / 1_000_000);
    let target_ms = i64::from(minute) * 60_000;

    let mut delay_ms = (target_ms - into_hour_ms).rem_euclid(HOUR_MS);
    if delay_ms == 0 {
        delay_ms = HOUR_MS;
    }
    Duration::from_millis(delay_ms as u64)
}

/// Index of the hour slot a tick at `at` belongs to.
///
/// Slots are centred on the `hh:minute:00` boundaries, so a wake-up slightly
/// before or after a boundary maps to the same slot.
pub fn tick_slot(at: DateTime<FixedOffset>, minute: u32) -> i64 {
    let local_ms = at.timestamp_millis() + i64::from(at.offset().local_minus_utc()) * 1_000;
    (local_ms - i64::from(minute) * 60_000 + HOUR_MS / 2).div_euclid(HOUR_MS)
}

pub struct ReminderScheduler {
    dispatcher: Arc<ReminderDispatcher>,
    utc_offset: FixedOffset,
    minute: u32,
    active_hours: Option<ActiveHours>,
}

impl ReminderScheduler {
    pub fn new(dispatcher: Arc<ReminderDispatcher>, utc_offset: FixedOffset, minute: u32) -> Self {
        Self {
            dispatcher,
            utc_offset,
            minute,
            active_hours: None,
        }
    }

    pub fn from_config(dispatcher: Arc<ReminderDispatcher>, config: &Config) -> Self {
        Self::new(dispatcher, config.utc_offset, config.reminder_minute)
            .with_active_hours(config.active_hours)
    }

    pub fn with_active_hours(mut self, active_hours: Option<ActiveHours>) -> Self {
        self.active_hours = active_hours;
        self
    }

    /// Whether a tick at local time `at` should broadcast
    pub fn is_active(&self, at: DateTime<FixedOffset>) -> bool {
        self.active_hours
            .map_or(true, |window| window.contains(at.hour()))
    }

    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.utc_offset)
    }

    /// Run forever; abort the spawned task to stop
    pub async fn run(self) {
        info!(
            "⏰ Reminder scheduler started (minute :{:02}, UTC offset {}, active hours {:?})",
            self.minute, self.utc_offset, self.active_hours
        );

        let mut last_slot: Option<i64> = None;
        loop {
            let delay = delay_until_next_tick(self.now(), self.minute);
            debug!("Next reminder tick in {}s", delay.as_secs());
            tokio::time::sleep(delay).await;

            let tick_at = self.now();
            let slot = tick_slot(tick_at, self.minute);
            if last_slot == Some(slot) {
                debug!("Skipping reminder tick at {tick_at}, this hour already fired");
                continue;
            }
            last_slot = Some(slot);

            if !self.is_active(tick_at) {
                debug!("Skipping reminder tick at {tick_at}, outside active hours");
                continue;
            }

            let dispatcher = self.dispatcher.clone();
            tokio::spawn(async move {
                dispatcher.run_tick().await;
            });
        }
    }
}
