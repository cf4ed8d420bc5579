//! User-facing reply texts
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use super::router::{AFFIRMATIVE, NEGATIVE};
use crate::features::intake::format_liters;

const INPUT_FORMAT: &str =
    "Надішли свій зріст (см) і вагу (кг) через пробіл, наприклад: `175 70`";

pub fn greeting() -> String {
    format!("👋 Привіт! Я допоможу розрахувати твою денну норму води.\n{INPUT_FORMAT}")
}

pub fn help() -> String {
    format!(
        "ℹ️ {INPUT_FORMAT}\n\n\
         /status - твоя підписка на нагадування\n\
         /stop - вимкнути нагадування"
    )
}

pub fn format_correction() -> String {
    format!("❌ Не вдалося розпізнати дані. {INPUT_FORMAT}")
}

pub fn target_with_prompt(target_liters: f64) -> String {
    format!(
        "💧 Твоя денна норма води: **{} л**.\n\
         Хочеш отримувати нагадування щогодини? Відповідай «{AFFIRMATIVE}» або «{NEGATIVE}».",
        format_liters(target_liters)
    )
}

pub fn choose_again() -> String {
    format!("🤔 Будь ласка, відповідай «{AFFIRMATIVE}» або «{NEGATIVE}».")
}

pub fn enrolled(target_liters: f64) -> String {
    format!(
        "✅ Готово! Нагадуватиму щогодини. Твоя норма: {} л.",
        format_liters(target_liters)
    )
}

pub fn declined() -> String {
    "👌 Добре, нагадувань не буде. Напиши зріст і вагу, якщо захочеш перерахувати норму."
        .to_string()
}

pub fn status(enabled: bool, target_liters: f64) -> String {
    let state = if enabled { "увімкнені" } else { "вимкнені" };
    format!(
        "📋 Нагадування {state}. Денна норма: {} л.",
        format_liters(target_liters)
    )
}

pub fn no_subscription() -> String {
    format!("📋 Ти ще не налаштовував нагадування. {INPUT_FORMAT}")
}

pub fn stopped() -> String {
    "🔕 Нагадування вимкнено.".to_string()
}

pub fn already_stopped() -> String {
    "🔕 Нагадування вже вимкнені.".to_string()
}
