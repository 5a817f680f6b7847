//! Fixed calibration tables for the Maharashtra grid.
//!
//! Everything here is read-only for the lifetime of the process.

use serde::Serialize;

/// Load sensitivity to each weather driver, plus yearly demand growth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SensitivityWeights {
    /// MW per °C above baseline
    pub temp: f64,
    /// MW per 10 % relative humidity above baseline
    pub humidity: f64,
    /// MW per W/m² of irradiance above baseline (rooftop solar offsets load)
    pub solar: f64,
    /// Fractional demand growth per year / offset step
    pub growth_rate: f64,
}

pub const SENSITIVITY: SensitivityWeights = SensitivityWeights {
    temp: 2.1,
    humidity: 1.5,
    solar: -0.005,
    growth_rate: 0.08,
};

/// Weather at which the impact adjustment is zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Baseline {
    pub temp: f64,
    pub humidity: f64,
    pub solar: f64,
}

pub const BASELINE: Baseline = Baseline {
    temp: 28.0,
    humidity: 68.0,
    solar: 500.0,
};

/// Base load in MW per tracked city.
pub const CITY_BASE_LOADS: [(&str, f64); 6] = [
    ("Mumbai", 5200.0),
    ("Pune", 3800.0),
    ("Nagpur", 2900.0),
    ("Nashik", 2100.0),
    ("Aurangabad", 1800.0),
    ("Kolhapur", 1600.0),
];

/// Assumed base load for a city missing from [`CITY_BASE_LOADS`].
pub const UNKNOWN_CITY_BASE_LOAD: f64 = 2000.0;

/// Year the growth factor is anchored to.
pub const GROWTH_BASE_YEAR: i32 = 2025;

/// Time-of-day load profile used by the daily forecast.
pub const DIURNAL: [(&str, f64); 7] = [
    ("00:00", 0.82),
    ("04:00", 0.75),
    ("08:00", 1.02),
    ("12:00", 1.23),
    ("16:00", 1.16),
    ("20:00", 1.09),
    ("23:59", 0.95),
];

/// Day-of-week load profile, Monday first.
pub const DAY_OF_WEEK: [(&str, f64); 7] = [
    ("Mon", 1.05),
    ("Tue", 1.08),
    ("Wed", 1.10),
    ("Thu", 1.12),
    ("Fri", 1.15),
    ("Sat", 0.95),
    ("Sun", 0.87),
];

/// Mumbai monthly climate normals: (month, temp °C, humidity %, solar W/m²).
pub const MONTHLY_CLIMATE: [(&str, f64, f64, f64); 12] = [
    ("Jan", 24.5, 64.0, 540.0),
    ("Feb", 25.8, 61.0, 590.0),
    ("Mar", 28.3, 65.0, 620.0),
    ("Apr", 30.6, 70.0, 580.0),
    ("May", 32.1, 73.0, 520.0),
    ("Jun", 30.2, 85.0, 310.0),
    ("Jul", 28.9, 90.0, 270.0),
    ("Aug", 28.7, 89.0, 290.0),
    ("Sep", 29.1, 86.0, 370.0),
    ("Oct", 30.2, 78.0, 460.0),
    ("Nov", 28.6, 68.0, 510.0),
    ("Dec", 26.1, 63.0, 520.0),
];

/// Sum of all tracked city base loads (MW).
pub fn total_base_load() -> f64 {
    CITY_BASE_LOADS.iter().map(|(_, mw)| mw).sum()
}

/// Base load for a city, falling back to [`UNKNOWN_CITY_BASE_LOAD`].
pub fn city_base_load(city: &str) -> f64 {
    CITY_BASE_LOADS
        .iter()
        .find(|(name, _)| *name == city)
        .map(|(_, mw)| *mw)
        .unwrap_or(UNKNOWN_CITY_BASE_LOAD)
}

/// Demand growth multiplier for a target year relative to [`GROWTH_BASE_YEAR`].
pub fn year_growth(year: i32) -> f64 {
    1.0 + (f64::from(year) - f64::from(GROWTH_BASE_YEAR)) * SENSITIVITY.growth_rate
}
