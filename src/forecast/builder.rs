//! Shaped load curves for the operator dashboard.
//!
//! Sub-hour and daily curves are pure formula. Weekly and monthly curves
//! prefer the model and fall back to `base_mw * day multiplier + overlay`
//! independently for every day.

use std::f64::consts::PI;
use tracing::debug;

use super::impact::sample_impact;
use super::noise::NoiseSource;
use crate::domain::tables::{total_base_load, BASELINE, DAY_OF_WEEK, DIURNAL, SENSITIVITY};
use crate::domain::{ForecastPoint, ForecastRange, SimulationParams, WeatherSample};
use crate::ml::{FeatureRow, ModelOracle};
use crate::utils::round1;

/// Largest accepted forward offset
pub const MAX_OFFSET: u32 = 20;

const HOUR_BASE_MW: f64 = 142.0;
const HOUR_SHAPE_AMPLITUDE: f64 = 0.015;
const HOUR_PREDICTION_BIAS: f64 = 1.5;
const HOUR_NOISE: f64 = 0.8;

const DAY_BASE_MW: f64 = 130.0;
const DAY_PREDICTION_BIAS: f64 = 4.0;
const DAY_NOISE: f64 = 3.0;

const WEEK_NOISE: f64 = 8.0;
const WEEKS_PER_MONTH: u32 = 4;

// Per-day weather jitter around the baseline fed to the model
const TEMP_JITTER: f64 = 1.5;
const HUMIDITY_JITTER: f64 = 3.0;
const SOLAR_JITTER: f64 = 30.0;

pub struct ForecastBuilder<'a> {
    oracle: &'a ModelOracle,
    year: i32,
}

impl<'a> ForecastBuilder<'a> {
    /// `year` is the calendar year fed to the model
    pub fn new(oracle: &'a ModelOracle, year: i32) -> Self {
        Self { oracle, year }
    }

    /// Build the curve for `range_key`; unknown keys yield an empty curve.
    pub fn build(
        &self,
        range_key: &str,
        offset: u32,
        params: Option<&SimulationParams>,
        noise: &mut dyn NoiseSource,
    ) -> Vec<ForecastPoint> {
        match ForecastRange::parse(range_key) {
            Some(range) => self.build_range(range, offset, params, noise),
            None => {
                debug!(range_key, "unknown forecast range");
                Vec::new()
            }
        }
    }

    pub fn build_range(
        &self,
        range: ForecastRange,
        offset: u32,
        params: Option<&SimulationParams>,
        noise: &mut dyn NoiseSource,
    ) -> Vec<ForecastPoint> {
        let growth = growth_factor(offset);
        let overlay = params
            .map(|p| sample_impact(&WeatherSample::from(*p)))
            .unwrap_or(0.0);

        let points = match range {
            ForecastRange::NextHour => next_hour(growth, overlay, noise),
            ForecastRange::NextDay => next_day(growth, overlay, noise),
            ForecastRange::NextWeek => self.next_week(growth, overlay, noise),
            ForecastRange::NextMonth => self.next_month(growth, overlay, noise),
        };

        debug!(%range, offset, overlay, points = points.len(), "forecast built");
        points
    }

    fn next_week(&self, growth: f64, overlay: f64, noise: &mut dyn NoiseSource) -> Vec<ForecastPoint> {
        let base_mw = total_base_load() * growth;

        DAY_OF_WEEK
            .iter()
            .map(|&(day, dow_mult)| {
                let row = self.jittered_row(base_mw * dow_mult, noise);
                let predicted = match self.oracle.predict_or_log(&row, day) {
                    Some(mw) => round1(mw * dow_mult + overlay),
                    None => round1(base_mw * dow_mult + overlay),
                };
                let actual = noise.add_noise(predicted, WEEK_NOISE);
                ForecastPoint::new(day, actual, predicted)
            })
            .collect()
    }

    fn next_month(&self, growth: f64, overlay: f64, noise: &mut dyn NoiseSource) -> Vec<ForecastPoint> {
        let base_mw = total_base_load() * growth;

        (1..=WEEKS_PER_MONTH)
            .map(|week| {
                let daily: Vec<f64> = DAY_OF_WEEK
                    .iter()
                    .map(|&(day, dow_mult)| {
                        let row = self.jittered_row(base_mw * dow_mult, noise);
                        let context = format!("Wk {week} {day}");
                        // the model path carries no what-if overlay
                        let day_pred = match self.oracle.predict_or_log(&row, &context) {
                            Some(mw) => mw * dow_mult,
                            None => base_mw * dow_mult + overlay,
                        };
                        round1(day_pred)
                    })
                    .collect();

                ForecastPoint::predicted_only(format!("Wk {week}"), weekly_mean(&daily))
            })
            .collect()
    }

    fn jittered_row(&self, base_load: f64, noise: &mut dyn NoiseSource) -> FeatureRow {
        FeatureRow {
            temp: BASELINE.temp + noise.add_noise(0.0, TEMP_JITTER),
            humidity: BASELINE.humidity + noise.add_noise(0.0, HUMIDITY_JITTER),
            solar: BASELINE.solar + noise.add_noise(0.0, SOLAR_JITTER),
            year: self.year,
            iex_factor: 1.0,
            base_load,
        }
    }
}

/// `1 + offset * growth_rate`
pub fn growth_factor(offset: u32) -> f64 {
    1.0 + f64::from(offset) * SENSITIVITY.growth_rate
}

/// Mean of the daily predictions, rounded to one decimal
pub fn weekly_mean(daily: &[f64]) -> f64 {
    if daily.is_empty() {
        return 0.0;
    }
    round1(daily.iter().sum::<f64>() / daily.len() as f64)
}

fn next_hour(growth: f64, overlay: f64, noise: &mut dyn NoiseSource) -> Vec<ForecastPoint> {
    let base = HOUR_BASE_MW * growth;

    (0..=60)
        .step_by(10)
        .map(|minute| {
            let shape = 1.0 + HOUR_SHAPE_AMPLITUDE * (PI * f64::from(minute) / 60.0).sin();
            let actual = noise.add_noise(base * shape, HOUR_NOISE);
            let predicted = round1(base * shape + HOUR_PREDICTION_BIAS + overlay);
            ForecastPoint::new(format!("{minute}m"), actual, predicted)
        })
        .collect()
}

fn next_day(growth: f64, overlay: f64, noise: &mut dyn NoiseSource) -> Vec<ForecastPoint> {
    let base = DAY_BASE_MW * growth;

    DIURNAL
        .iter()
        .map(|&(label, multiplier)| {
            let actual = noise.add_noise(base * multiplier, DAY_NOISE);
            let predicted = round1(base * multiplier + DAY_PREDICTION_BIAS + overlay);
            ForecastPoint::new(label, actual, predicted)
        })
        .collect()
}
