//! # Feature: Subscribers
//!
//! Durable reminder subscriptions keyed by user, stored as one JSON document.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: In-memory cache with serialized writes
//! - 1.0.0: Initial release

pub mod record;
pub mod store;

pub use record::{RecipientHandle, SubscriberMap, SubscriberRecord, UserId};
pub use store::{SubscriberStore, UpdateOutcome};
