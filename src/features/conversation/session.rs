//! Per-user conversation state and measurement parsing
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use crate::core::ValidationError;
use regex::Regex;
use std::sync::LazyLock;

/// Digits with at most one embedded decimal point. No sign, no exponent.
static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(?:\.[0-9]+)?$").expect("number pattern compiles"));

/// Where a user is in the input flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    AwaitingMeasurements,
    AwaitingReminderChoice,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::AwaitingMeasurements => write!(f, "awaiting_measurements"),
            Phase::AwaitingReminderChoice => write!(f, "awaiting_reminder_choice"),
        }
    }
}

/// Transient, in-memory conversation state for one user
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub phase: Phase,
    pub pending_target_liters: Option<f64>,
    /// Last submitted height. Kept for later use, not part of the target.
    pub height_cm: Option<f64>,
}

impl Session {
    /// Move to the confirmation step with a freshly computed target
    pub fn await_choice(&mut self, measurements: Measurements, target_liters: f64) {
        self.phase = Phase::AwaitingReminderChoice;
        self.pending_target_liters = Some(target_liters);
        self.height_cm = Some(measurements.height_cm);
    }

    /// Back to the start of the flow; the pending target is consumed
    pub fn reset(&mut self) {
        self.phase = Phase::AwaitingMeasurements;
        self.pending_target_liters = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurements {
    pub height_cm: f64,
    pub weight_kg: f64,
}

/// Parse `"<height> <weight>"`
pub fn parse_measurements(text: &str) -> Result<Measurements, ValidationError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() != 2 {
        return Err(ValidationError::TokenCount(tokens.len()));
    }

    Ok(Measurements {
        height_cm: parse_number(tokens[0])?,
        weight_kg: parse_number(tokens[1])?,
    })
}

fn parse_number(token: &str) -> Result<f64, ValidationError> {
    if !NUMBER.is_match(token) {
        return Err(ValidationError::NotANumber(token.to_string()));
    }
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValidationError::NotANumber(token.to_string())),
    }
}
