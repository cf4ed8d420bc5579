//! # Feature: Water Intake
//!
//! Daily water target derived from body weight.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

pub mod calculator;

pub use calculator::{compute_daily_target, format_liters, DEFAULT_TARGET_LITERS, ML_PER_KG};
