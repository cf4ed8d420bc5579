//! # Reminders Feature
//!
//! Hourly water reminders broadcast to every enabled subscriber.
//!
//! - **Version**: 2.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: true
//!
//! ## Changelog
//! - 2.0.0: Split broadcast (dispatcher) from the hourly timer (scheduler)
//! - 1.0.0: Initial release

pub mod dispatcher;
pub mod scheduler;

pub use dispatcher::{dispatch, reminder_text, DispatchReport, ReminderDispatcher};
pub use scheduler::{delay_until_next_tick, tick_slot, ReminderScheduler};
