//! # Core Module
//!
//! Core domain types, configuration, and error handling for the water reminder bot.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Add typed error taxonomy
//! - 1.0.0: Initial creation with config module

pub mod config;
pub mod error;

// Re-export commonly used items
pub use config::{ActiveHours, Config};
pub use error::{ConfigError, DeliveryError, PersistenceError, ValidationError};
