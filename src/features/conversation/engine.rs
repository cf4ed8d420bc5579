//! Conversation state machine
//!
//! Drives the two-step flow: measurements → target + yes/no prompt → answer.
//! Each user's session sits behind its own async mutex, so messages from one
//! user are handled in order while different users proceed independently.
//!
//! - **Version**: 1.2.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.2.0: /status and /stop commands
//! - 1.1.0: Reuse the stored target when confirming without new measurements
//! - 1.0.0: Initial release

use super::replies;
use super::router::{classify, parse_choice, Choice, Command, Inbound};
use super::session::{parse_measurements, Phase, Session};
use crate::core::ValidationError;
use crate::features::intake::{compute_daily_target, DEFAULT_TARGET_LITERS};
use crate::features::subscribers::{RecipientHandle, SubscriberRecord, SubscriberStore, UserId};
use dashmap::DashMap;
use log::{debug, info, warn};
use std::sync::Arc;
use tokio::sync::Mutex;

/// One message from the inbound transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub user: UserId,
    pub recipient: RecipientHandle,
    pub text: String,
}

impl InboundMessage {
    pub fn new(user: UserId, recipient: RecipientHandle, text: impl Into<String>) -> Self {
        Self {
            user,
            recipient,
            text: text.into(),
        }
    }
}

pub struct ConversationEngine {
    store: Arc<SubscriberStore>,
    sessions: DashMap<UserId, Arc<Mutex<Session>>>,
}

impl ConversationEngine {
    pub fn new(store: Arc<SubscriberStore>) -> Self {
        Self {
            store,
            sessions: DashMap::new(),
        }
    }

    /// Handle one inbound message, returning the reply to send (if any)
    pub async fn handle(&self, msg: &InboundMessage) -> Option<String> {
        let session = self.session_for(&msg.user);
        let mut session = session.lock().await;

        match classify(&msg.text) {
            Inbound::Command(command) => self.handle_command(msg, &mut session, command).await,
            Inbound::Confirmation(_) => Some(self.handle_reminder_choice(msg, &mut session).await),
            Inbound::MeasurementData => Some(self.handle_measurements(msg, &mut session)),
        }
    }

    /// Current phase for `user`; unknown users are awaiting measurements
    pub async fn phase(&self, user: &UserId) -> Phase {
        let session = match self.sessions.get(user) {
            Some(entry) => entry.value().clone(),
            None => return Phase::default(),
        };
        let phase = session.lock().await.phase;
        phase
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }

    fn session_for(&self, user: &UserId) -> Arc<Mutex<Session>> {
        self.sessions.entry(user.clone()).or_default().clone()
    }

    fn handle_measurements(&self, msg: &InboundMessage, session: &mut Session) -> String {
        let parsed = parse_measurements(&msg.text).and_then(|measurements| {
            let target = compute_daily_target(measurements.weight_kg);
            if target.is_finite() {
                Ok((measurements, target))
            } else {
                Err(ValidationError::TargetOutOfRange(measurements.weight_kg))
            }
        });

        match parsed {
            Ok((measurements, target)) => {
                session.await_choice(measurements, target);
                debug!(
                    "User {} submitted {:?}, target {target} L",
                    msg.user, measurements
                );
                replies::target_with_prompt(target)
            }
            Err(e) => {
                debug!("Rejected measurements from {}: {e}", msg.user);
                replies::format_correction()
            }
        }
    }

    async fn handle_reminder_choice(&self, msg: &InboundMessage, session: &mut Session) -> String {
        let choice = match parse_choice(&msg.text) {
            Some(choice) => choice,
            None => {
                let e = ValidationError::UnknownChoice(msg.text.clone());
                debug!("Rejected answer from {}: {e}", msg.user);
                return replies::choose_again();
            }
        };

        if session.phase == Phase::AwaitingMeasurements {
            debug!(
                "User {} answered {choice:?} without pending measurements",
                msg.user
            );
        }

        let pending = session.pending_target_liters;
        let user = msg.user.clone();
        let recipient = msg.recipient.clone();

        let reply = match choice {
            Choice::Yes => {
                let outcome = self
                    .store
                    .update(move |records| {
                        let target = pending
                            .or_else(|| records.get(&user).map(|r| r.daily_target_liters))
                            .unwrap_or(DEFAULT_TARGET_LITERS);
                        records.insert(user, SubscriberRecord::enabled(recipient, target));
                        target
                    })
                    .await;
                if outcome.persisted.is_err() {
                    warn!("Enrollment of {} kept in memory only", msg.user);
                }
                info!(
                    "🔔 User {} enabled reminders ({} L)",
                    msg.user, outcome.value
                );
                replies::enrolled(outcome.value)
            }
            Choice::No => {
                let outcome = self
                    .store
                    .update(move |records| match records.get_mut(&user) {
                        Some(record) => record.reminder_enabled = false,
                        None => {
                            let target = pending.unwrap_or(DEFAULT_TARGET_LITERS);
                            records.insert(user, SubscriberRecord::disabled(recipient, target));
                        }
                    })
                    .await;
                if outcome.persisted.is_err() {
                    warn!("Opt-out of {} kept in memory only", msg.user);
                }
                info!("🔕 User {} declined reminders", msg.user);
                replies::declined()
            }
        };

        session.reset();
        reply
    }

    async fn handle_command(
        &self,
        msg: &InboundMessage,
        session: &mut Session,
        command: Command,
    ) -> Option<String> {
        match command {
            Command::Start => {
                session.reset();
                Some(replies::greeting())
            }
            Command::Help => Some(replies::help()),
            Command::Status => Some(match self.store.get(&msg.user).await {
                Some(record) => {
                    replies::status(record.reminder_enabled, record.daily_target_liters)
                }
                None => replies::no_subscription(),
            }),
            Command::Stop => Some(self.stop_reminders(msg).await),
            Command::Unknown(name) => {
                debug!("Ignoring unknown command /{name} from {}", msg.user);
                None
            }
        }
    }

    async fn stop_reminders(&self, msg: &InboundMessage) -> String {
        match self.store.get(&msg.user).await {
            None => replies::no_subscription(),
            Some(record) if !record.reminder_enabled => replies::already_stopped(),
            Some(_) => {
                let user = msg.user.clone();
                let outcome = self
                    .store
                    .update(move |records| {
                        if let Some(record) = records.get_mut(&user) {
                            record.reminder_enabled = false;
                        }
                    })
                    .await;
                if outcome.persisted.is_err() {
                    warn!("Stop for {} kept in memory only", msg.user);
                }
                info!("🔕 User {} stopped reminders", msg.user);
                replies::stopped()
            }
        }
    }
}
