//! Twelve-month energy outlook from Mumbai climate normals.

use super::impact::weather_impact;
use crate::domain::tables::{total_base_load, year_growth, MONTHLY_CLIMATE};
use crate::domain::MonthlyPoint;
use crate::ml::{FeatureRow, ModelOracle};
use crate::utils::round1;

/// Hours in the nominal 30 day month used for MU conversion
const HOURS_PER_MONTH: f64 = 24.0 * 30.0;

/// MW held for a month, in million units
fn mw_to_monthly_mu(mw: f64) -> f64 {
    round1(mw * HOURS_PER_MONTH / 1000.0)
}

/// Physics estimate: base load grown to `year`, shifted by weather impact.
pub fn physics_monthly_mu(temp: f64, humidity: f64, solar: f64, year: i32) -> f64 {
    let base_mw = total_base_load() * year_growth(year);
    let w_delta = weather_impact(temp, humidity, solar);
    mw_to_monthly_mu((base_mw + w_delta * 100.0).max(0.0))
}

/// Monthly MU for every month of `year`, model first, physics as fallback.
pub fn forecast_year(oracle: &ModelOracle, year: i32) -> Vec<MonthlyPoint> {
    let base_load = total_base_load();

    MONTHLY_CLIMATE
        .iter()
        .map(|&(month, temp, humidity, solar)| {
            let row = FeatureRow {
                temp,
                humidity,
                solar,
                year,
                iex_factor: 1.0,
                base_load,
            };
            let predicted = match oracle.predict_or_log(&row, month) {
                Some(mw) => mw_to_monthly_mu(mw),
                None => physics_monthly_mu(temp, humidity, solar, year),
            };
            MonthlyPoint {
                time: month.to_string(),
                predicted,
            }
        })
        .collect()
}
