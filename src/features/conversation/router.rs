//! Inbound message classification
//!
//! Messages are routed by shape only: commands first, then the fixed yes/no
//! vocabulary, and everything else is treated as measurement data. The
//! confirmation check must run before the data fallback since the yes/no words
//! are themselves valid free text.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Add /help, /status and /stop commands
//! - 1.0.0: Initial release with /start and yes/no routing

/// Affirmative answer, compared case-insensitively
pub const AFFIRMATIVE: &str = "Так";
/// Negative answer, compared case-insensitively
pub const NEGATIVE: &str = "Ні";

/// Answer to the "enable reminders?" question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Yes,
    No,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Status,
    Stop,
    Unknown(String),
}

impl Command {
    fn from_name(name: &str) -> Self {
        match name {
            "start" => Command::Start,
            "help" => Command::Help,
            "status" => Command::Status,
            "stop" => Command::Stop,
            other => Command::Unknown(other.to_string()),
        }
    }
}

/// What an inbound message is, before any per-user state is consulted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    Command(Command),
    Confirmation(Choice),
    MeasurementData,
}

/// Classify raw message text
pub fn classify(text: &str) -> Inbound {
    if let Some(command) = parse_command(text) {
        return Inbound::Command(command);
    }
    if let Some(choice) = parse_choice(text) {
        return Inbound::Confirmation(choice);
    }
    Inbound::MeasurementData
}

/// Match the yes/no vocabulary (Unicode case folding, surrounding whitespace ignored)
pub fn parse_choice(text: &str) -> Option<Choice> {
    let answer = text.trim().to_lowercase();
    if answer == AFFIRMATIVE.to_lowercase() {
        Some(Choice::Yes)
    } else if answer == NEGATIVE.to_lowercase() {
        Some(Choice::No)
    } else {
        None
    }
}

/// Parse `/name` or `/name@bot`, ignoring any arguments
fn parse_command(text: &str) -> Option<Command> {
    let first = text.split_whitespace().next()?;
    let name = first.strip_prefix('/')?;
    let name = name.split('@').next().unwrap_or(name);
    if name.is_empty() {
        return None;
    }
    Some(Command::from_name(&name.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_is_case_insensitive() {
        assert_eq!(parse_choice("Так"), Some(Choice::Yes));
        assert_eq!(parse_choice("так"), Some(Choice::Yes));
        assert_eq!(parse_choice("ТАК"), Some(Choice::Yes));
        assert_eq!(parse_choice("Ні"), Some(Choice::No));
        assert_eq!(parse_choice("ні"), Some(Choice::No));
        assert_eq!(parse_choice("НІ"), Some(Choice::No));
        assert_eq!(parse_choice("  Так \n"), Some(Choice::Yes));
    }

    #[test]
    fn test_choice_requires_exact_word() {
        assert_eq!(parse_choice("Так, звісно"), None);
        assert_eq!(parse_choice("yes"), None);
        assert_eq!(parse_choice("Ніколи"), None);
        assert_eq!(parse_choice(""), None);
    }

    #[test]
    fn test_confirmation_wins_over_data() {
        assert_eq!(classify("Так"), Inbound::Confirmation(Choice::Yes));
        assert_eq!(classify("ні"), Inbound::Confirmation(Choice::No));
    }

    #[test]
    fn test_everything_else_is_data() {
        assert_eq!(classify("175 70"), Inbound::MeasurementData);
        assert_eq!(classify("hello"), Inbound::MeasurementData);
        assert_eq!(classify(""), Inbound::MeasurementData);
        assert_eq!(classify("/"), Inbound::MeasurementData);
    }

    #[test]
    fn test_commands() {
        assert_eq!(classify("/start"), Inbound::Command(Command::Start));
        assert_eq!(classify("/START"), Inbound::Command(Command::Start));
        assert_eq!(classify("/start@water_bot"), Inbound::Command(Command::Start));
        assert_eq!(classify("/help me"), Inbound::Command(Command::Help));
        assert_eq!(classify("/status"), Inbound::Command(Command::Status));
        assert_eq!(classify("/stop"), Inbound::Command(Command::Stop));
        assert_eq!(
            classify("/dance"),
            Inbound::Command(Command::Unknown("dance".to_string()))
        );
    }
}
