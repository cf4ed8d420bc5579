//! # Features
//!
//! Water intake, subscriptions, conversation flow and hourly reminders.

pub mod conversation;
pub mod intake;
pub mod reminders;
pub mod subscribers;

pub use conversation::{ConversationEngine, InboundMessage};
pub use intake::compute_daily_target;
pub use reminders::{ReminderDispatcher, ReminderScheduler};
pub use subscribers::{RecipientHandle, SubscriberRecord, SubscriberStore, UserId};
