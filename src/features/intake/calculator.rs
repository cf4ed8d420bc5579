//! Water intake calculation
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

/// Millilitres of water per kilogram of body weight per day
pub const ML_PER_KG: f64 = 30.0;

/// Target assumed for subscribers that never submitted measurements
pub const DEFAULT_TARGET_LITERS: f64 = 2.0;

/// Daily water target in litres: `weight_kg * 30 / 1000`, rounded to 2 decimals.
///
/// Rounding is half away from zero, which is half-up for the non-negative
/// weights this is called with. The value is scaled to hundredths of a litre
/// before rounding (`weight_kg * 3`) so decimal halves such as `65.5 kg`
/// round on an exact binary value. Negative weights are not rejected here, and
/// weights near `f64::MAX` overflow to infinity; callers check `is_finite`.
pub fn compute_daily_target(weight_kg: f64) -> f64 {
    let hundredths = weight_kg * ML_PER_KG / 10.0;
    hundredths.round() / 100.0
}

/// Render litres the way users see them (`2.1`, `1.97`, `2`)
pub fn format_liters(liters: f64) -> String {
    format!("{liters}")
}
