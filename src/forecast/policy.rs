//! Per-city load projection for the policy dashboard.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use super::impact::weather_impact;
use crate::domain::tables::{city_base_load, year_growth, BASELINE};
use crate::ml::{FeatureRow, ModelOracle};
use crate::utils::round1;

/// Earliest and latest planning year accepted
pub const MIN_TARGET_YEAR: i32 = 1900;
pub const MAX_TARGET_YEAR: i32 = 2200;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PolicyRequest {
    #[validate(range(min = MIN_TARGET_YEAR, max = MAX_TARGET_YEAR))]
    pub target_year: i32,
    /// Market price driven demand multiplier
    #[validate(range(min = 0.0))]
    pub iex_factor: f64,
    /// Cities in request order
    #[serde(default, deserialize_with = "cities_in_order")]
    pub city_data: Vec<(String, CitySensors)>,
}

fn cities_in_order<'de, D>(deserializer: D) -> Result<Vec<(String, CitySensors)>, D::Error>
where
    D: Deserializer<'de>,
{
    Map::<String, Value>::deserialize(deserializer)?
        .into_iter()
        .map(|(city, sensors)| {
            serde_json::from_value(sensors)
                .map(|sensors| (city.clone(), sensors))
                .map_err(|e| serde::de::Error::custom(format!("city '{city}': {e}")))
        })
        .collect()
}

/// Sensor readings for one city; missing values mean baseline weather
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct CitySensors {
    pub temp: Option<f64>,
    pub humidity: Option<f64>,
    pub solar: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyResponse {
    pub success: bool,
    pub total_mw: f64,
    /// MW per city, keyed in request order
    pub breakdown: Map<String, Value>,
    pub year: i32,
}

pub fn predict_policy(oracle: &ModelOracle, req: &PolicyRequest) -> PolicyResponse {
    let year_factor = year_growth(req.target_year);

    let loads: Vec<(String, f64)> = req
        .city_data
        .iter()
        .map(|(city, sensors)| {
            let temp = sensors.temp.unwrap_or(BASELINE.temp);
            let humidity = sensors.humidity.unwrap_or(BASELINE.humidity);
            let solar = sensors.solar.unwrap_or(BASELINE.solar);
            let base = city_base_load(city);

            let row = FeatureRow {
                temp,
                humidity,
                solar,
                year: req.target_year,
                iex_factor: req.iex_factor,
                base_load: base,
            };

            let city_load = match oracle.predict_or_log(&row, city) {
                Some(mw) => round1(mw * req.iex_factor),
                None => {
                    let w_impact = weather_impact(temp, humidity, solar);
                    round1(((base + w_impact * 100.0) * year_factor * req.iex_factor).max(0.0))
                }
            };

            (city.clone(), city_load)
        })
        .collect();

    let total_mw = round1(loads.iter().map(|(_, mw)| mw).sum());
    let breakdown = loads
        .into_iter()
        .map(|(city, mw)| (city, Value::from(mw)))
        .collect();

    PolicyResponse {
        success: true,
        total_mw,
        breakdown,
        year: req.target_year,
    }
}
