//! Decimal rounding for values that end up in JSON responses.

/// Round `value` to `places` decimal digits, half away from zero.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// One decimal place (MW, MU, percentages)
pub fn round1(value: f64) -> f64 {
    round_to(value, 1)
}

/// Three decimal places (weather impact)
pub fn round3(value: f64) -> f64 {
    round_to(value, 3)
}
