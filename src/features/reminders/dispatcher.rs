//! Reminder broadcast
//!
//! One pass over a subscriber snapshot. A failed delivery is logged and
//! skipped; the rest of the batch still goes out and nothing is retried until
//! the next tick.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use crate::features::intake::format_liters;
use crate::features::subscribers::{SubscriberMap, SubscriberStore};
use crate::messenger::Messenger;
use log::{debug, info, warn};
use std::sync::Arc;

pub fn reminder_text(target_liters: f64) -> String {
    format!(
        "💧 Час випити води! Твоя денна норма: {} л.",
        format_liters(target_liters)
    )
}

/// Outcome of one broadcast
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchReport {
    /// Subscribers with reminders enabled
    pub enabled: usize,
    pub delivered: usize,
    pub failed: usize,
}

/// Send one reminder to every enabled subscriber in `subscribers`
pub async fn dispatch(subscribers: &SubscriberMap, messenger: &dyn Messenger) -> DispatchReport {
    let mut report = DispatchReport::default();

    for (user, record) in subscribers.iter().filter(|(_, r)| r.reminder_enabled) {
        report.enabled += 1;
        let text = reminder_text(record.daily_target_liters);
        match messenger.send(&record.recipient_handle, &text).await {
            Ok(()) => {
                report.delivered += 1;
                debug!("Reminder delivered to {user}");
            }
            Err(e) => {
                report.failed += 1;
                warn!("Reminder to user {user} failed: {e}");
            }
        }
    }

    report
}

/// Entry point the timer invokes once per tick
pub struct ReminderDispatcher {
    store: Arc<SubscriberStore>,
    messenger: Arc<dyn Messenger>,
}

impl ReminderDispatcher {
    pub fn new(store: Arc<SubscriberStore>, messenger: Arc<dyn Messenger>) -> Self {
        Self { store, messenger }
    }

    pub async fn run_tick(&self) -> DispatchReport {
        let snapshot = self.store.snapshot().await;
        if snapshot.is_empty() {
            debug!("No subscribers, skipping reminder tick");
            return DispatchReport::default();
        }

        let report = dispatch(&snapshot, self.messenger.as_ref()).await;
        info!(
            "⏰ Reminder tick: {} delivered, {} failed ({} enabled of {} subscribers)",
            report.delivered,
            report.failed,
            report.enabled,
            snapshot.len()
        );
        report
    }
}
