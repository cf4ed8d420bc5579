//! Runtime configuration loaded from environment variables
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Add reminder minute and active hours window
//! - 1.0.0: Initial release with token, storage path and timezone offset

use super::error::ConfigError;
use chrono::FixedOffset;

pub const DEFAULT_SUBSCRIBERS_PATH: &str = "users.json";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Local hours (inclusive start, exclusive end) during which reminders go out.
///
/// `start > end` wraps past midnight, so `22-6` covers the night.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveHours {
    pub start: u32,
    pub end: u32,
}

impl ActiveHours {
    pub fn contains(&self, hour: u32) -> bool {
        if self.start <= self.end {
            hour >= self.start && hour < self.end
        } else {
            hour >= self.start || hour < self.end
        }
    }
}

impl std::str::FromStr for ActiveHours {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once('-')
            .ok_or_else(|| "expected START-END, e.g. 8-22".to_string())?;
        let parse_hour = |part: &str| -> Result<u32, String> {
            let hour: u32 = part
                .trim()
                .parse()
                .map_err(|_| format!("'{}' is not an hour", part.trim()))?;
            if hour > 24 {
                return Err(format!("hour {hour} is out of range 0-24"));
            }
            Ok(hour)
        };
        let start = parse_hour(start)?;
        let end = parse_hour(end)?;
        if start == end {
            return Err("window is empty".to_string());
        }
        Ok(Self { start, end })
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub subscribers_path: String,
    pub log_level: String,
    pub utc_offset: FixedOffset,
    pub reminder_minute: u32,
    pub active_hours: Option<ActiveHours>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let discord_token = get("DISCORD_TOKEN").ok_or(ConfigError::Missing("DISCORD_TOKEN"))?;

        let subscribers_path =
            get("SUBSCRIBERS_PATH").unwrap_or_else(|| DEFAULT_SUBSCRIBERS_PATH.to_string());
        let log_level = get("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        let offset_minutes = match get("REMINDER_UTC_OFFSET_MINUTES") {
            Some(raw) => raw
                .trim()
                .parse::<i32>()
                .map_err(|e| ConfigError::Invalid {
                    key: "REMINDER_UTC_OFFSET_MINUTES",
                    value: raw.clone(),
                    reason: e.to_string(),
                })?,
            None => 0,
        };
        let utc_offset =
            FixedOffset::east_opt(offset_minutes * 60).ok_or_else(|| ConfigError::Invalid {
                key: "REMINDER_UTC_OFFSET_MINUTES",
                value: offset_minutes.to_string(),
                reason: "must be within ±1439 minutes".to_string(),
            })?;

        let reminder_minute = match get("REMINDER_MINUTE") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(minute) if minute < 60 => minute,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "REMINDER_MINUTE",
                        value: raw,
                        reason: "must be a minute between 0 and 59".to_string(),
                    })
                }
            },
            None => 0,
        };

        let active_hours = match get("REMINDER_ACTIVE_HOURS") {
            Some(raw) => Some(raw.parse::<ActiveHours>().map_err(|reason| {
                ConfigError::Invalid {
                    key: "REMINDER_ACTIVE_HOURS",
                    value: raw.clone(),
                    reason,
                }
            })?),
            None => None,
        };

        Ok(Config {
            discord_token,
            subscribers_path,
            log_level,
            utc_offset,
            reminder_minute,
            active_hours,
        })
    }
}
