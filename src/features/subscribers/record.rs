//! Subscriber record types and the on-disk document schema
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Accept numeric `chat_id` values written by older deployments
//! - 1.0.0: Initial release

use crate::features::intake::DEFAULT_TARGET_LITERS;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Opaque identity of a chat user
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Address the outbound transport delivers to (a DM channel id for Discord)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RecipientHandle(pub String);

impl RecipientHandle {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecipientHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecipientHandle {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => RecipientHandle(s),
            Raw::Signed(n) => RecipientHandle(n.to_string()),
            Raw::Unsigned(n) => RecipientHandle(n.to_string()),
        })
    }
}

fn default_target() -> f64 {
    DEFAULT_TARGET_LITERS
}

/// Persisted reminder subscription for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriberRecord {
    #[serde(rename = "chat_id")]
    pub recipient_handle: RecipientHandle,

    #[serde(rename = "reminder")]
    pub reminder_enabled: bool,

    #[serde(rename = "water", default = "default_target")]
    pub daily_target_liters: f64,
}

impl SubscriberRecord {
    pub fn enabled(recipient_handle: RecipientHandle, daily_target_liters: f64) -> Self {
        Self {
            recipient_handle,
            reminder_enabled: true,
            daily_target_liters,
        }
    }

    pub fn disabled(recipient_handle: RecipientHandle, daily_target_liters: f64) -> Self {
        Self {
            recipient_handle,
            reminder_enabled: false,
            daily_target_liters,
        }
    }
}

/// The whole persisted record set. Ordered so the document diff stays stable.
pub type SubscriberMap = BTreeMap<UserId, SubscriberRecord>;
