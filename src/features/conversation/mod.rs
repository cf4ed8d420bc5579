//! # Feature: Conversation
//!
//! Two-step input flow (measurements, then the reminder question) with
//! per-user transient sessions and shape-based message routing.
//!
//! - **Version**: 1.2.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: /help, /status and /stop commands
//! - 1.1.0: Per-user session locking
//! - 1.0.0: Initial release with /start and yes/no routing

pub mod engine;
pub mod replies;
pub mod router;
pub mod session;

pub use engine::{ConversationEngine, InboundMessage};
pub use router::{classify, parse_choice, Choice, Command, Inbound};
pub use session::{parse_measurements, Measurements, Phase, Session};
