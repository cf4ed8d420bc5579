//! # Outbound Messaging
//!
//! Transport-agnostic "send text to recipient" seam used for conversation
//! replies and reminder broadcasts, plus the Discord implementation.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

use crate::core::DeliveryError;
use crate::features::subscribers::RecipientHandle;
use async_trait::async_trait;
use serenity::http::Http;
use serenity::model::id::ChannelId;
use std::sync::Arc;

/// Delivers a text message to a recipient handle
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send(&self, recipient: &RecipientHandle, text: &str) -> Result<(), DeliveryError>;
}

/// Sends to Discord channels; the recipient handle is the channel id
#[derive(Clone)]
pub struct DiscordMessenger {
    http: Arc<Http>,
}

impl DiscordMessenger {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Messenger for DiscordMessenger {
    async fn send(&self, recipient: &RecipientHandle, text: &str) -> Result<(), DeliveryError> {
        let channel_id: u64 = recipient
            .as_str()
            .parse()
            .map_err(|e| DeliveryError::new(recipient.as_str(), format!("not a channel id: {e}")))?;

        ChannelId(channel_id)
            .say(&self.http, text)
            .await
            .map_err(|e| DeliveryError::new(recipient.as_str(), e))?;

        Ok(())
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// Records every delivery; recipients in `failing` get a `DeliveryError`
    #[derive(Default)]
    pub struct RecordingMessenger {
        sent: Mutex<Vec<(String, String)>>,
        failing: HashSet<String>,
    }

    impl RecordingMessenger {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn failing_for(recipients: &[&str]) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                failing: recipients.iter().map(|r| r.to_string()).collect(),
            }
        }

        pub fn sent(&self) -> Vec<(String, String)> {
            self.sent.lock().unwrap().clone()
        }

        pub fn sent_to(&self, recipient: &str) -> Vec<String> {
            self.sent()
                .into_iter()
                .filter(|(to, _)| to == recipient)
                .map(|(_, text)| text)
                .collect()
        }
    }

    #[async_trait]
    impl Messenger for RecordingMessenger {
        async fn send(
            &self,
            recipient: &RecipientHandle,
            text: &str,
        ) -> Result<(), DeliveryError> {
            if self.failing.contains(recipient.as_str()) {
                return Err(DeliveryError::new(recipient.as_str(), "recipient unreachable"));
            }
            self.sent
                .lock()
                .unwrap()
                .push((recipient.as_str().to_string(), text.to_string()));
            Ok(())
        }
    }
}
