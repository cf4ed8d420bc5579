// Core layer - shared types and configuration
pub mod core;

// Features layer - all feature modules
pub mod features;

// Outbound transport seam
pub mod messenger;

// Re-export core config for convenience
pub use crate::core::Config;

pub use features::{
    // Conversation
    ConversationEngine, InboundMessage,
    // Intake
    compute_daily_target,
    // Reminders
    ReminderDispatcher, ReminderScheduler,
    // Subscribers
    RecipientHandle, SubscriberRecord, SubscriberStore, UserId,
};

pub use messenger::{DiscordMessenger, Messenger};

#[cfg(test)]
mod tests;
