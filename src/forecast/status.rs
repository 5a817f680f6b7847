//! Citizen-facing "grid right now" snapshot.

use chrono::{Datelike, Local, Timelike};
use strum::IntoStaticStr;
use tracing::debug;

use super::impact::sample_impact;
use super::weather::{snapshot_or, WeatherProvider};
use crate::domain::tables::total_base_load;
use crate::domain::{StatusSnapshot, StatusWeather, WeatherSample};
use crate::ml::{FeatureRow, ModelOracle};
use crate::utils::round1;

/// Installed capacity relative to base load
pub const CAPACITY_HEADROOM: f64 = 1.25;
pub const PEAK_THRESHOLD_PCT: f64 = 80.0;
pub const CRITICAL_THRESHOLD_PCT: f64 = 92.0;
pub const HEAT_THRESHOLD_C: f64 = 32.0;
pub const MAX_RENEWABLE_PCT: f64 = 45.0;
/// Tonnes of CO2 avoided per renewable-percent-MW
const CO2_FACTOR: f64 = 0.0005;

/// Energy saving advice, highest priority first
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
pub enum Tip {
    Critical,
    PeakHeat,
    Peak,
    OffPeak,
    Stable,
}

impl Tip {
    /// Pick exactly one tip for the current conditions
    pub fn select(load_pct: f64, temp: f64, hour: u32) -> Self {
        let is_peak = load_pct > PEAK_THRESHOLD_PCT;
        if load_pct > CRITICAL_THRESHOLD_PCT {
            Self::Critical
        } else if is_peak && temp > HEAT_THRESHOLD_C {
            Self::PeakHeat
        } else if is_peak {
            Self::Peak
        } else if hour >= 22 || hour < 6 {
            Self::OffPeak
        } else {
            Self::Stable
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Critical => {
                "🚨 Critical load — please avoid all non-essential appliances immediately."
            }
            Self::PeakHeat => {
                "☀️ Peak hours + high heat. Set AC to 24°C and avoid using ovens or dryers."
            }
            Self::Peak => {
                "⚡ Peak demand right now. Delay washing machines and dishwashers if possible."
            }
            Self::OffPeak => {
                "🌙 Off-peak hours — great time to run heavy appliances and charge EVs."
            }
            Self::Stable => {
                "✅ Grid is stable. Consider switching to energy-saving mode on your devices."
            }
        }
    }
}

/// Relative load for the hour of day
pub fn hourly_multiplier(hour: u32) -> f64 {
    match hour {
        0..=3 => 0.78,
        4..=7 => 0.80,
        8..=11 => 1.05,
        12..=15 => 1.22,
        16..=19 => 1.18,
        20..=21 => 1.08,
        _ => 0.92,
    }
}

/// Share of renewables: more sun helps, heat above 25 °C hurts. Bounded to `[0, 45]`.
pub fn renewable_pct(solar: f64, temp: f64) -> f64 {
    let raw = 20.0 + (solar / 1000.0) * 30.0 - (temp - 25.0) * 0.3;
    round1(raw.min(MAX_RENEWABLE_PCT).max(0.0))
}

pub struct StatusComposer<'a> {
    oracle: &'a ModelOracle,
}

impl<'a> StatusComposer<'a> {
    pub fn new(oracle: &'a ModelOracle) -> Self {
        Self { oracle }
    }

    /// Snapshot for the current local time using live weather
    pub async fn compose(&self, weather: &dyn WeatherProvider) -> StatusSnapshot {
        let sample = snapshot_or(weather, WeatherSample::status_fallback()).await;
        let now = Local::now();
        self.compose_at(sample, now.hour(), now.year(), now.format("%H:%M").to_string())
    }

    pub fn compose_at(
        &self,
        weather: WeatherSample,
        hour: u32,
        year: i32,
        timestamp: String,
    ) -> StatusSnapshot {
        let base_mw = total_base_load();
        let d_mult = hourly_multiplier(hour);

        let row = FeatureRow {
            temp: weather.temp,
            humidity: weather.humidity,
            solar: weather.solar,
            year,
            iex_factor: 1.0,
            base_load: base_mw * d_mult,
        };

        let current_mw = match self.oracle.predict_or_log(&row, "public status") {
            Some(mw) => round1(mw * d_mult),
            None => round1((base_mw * d_mult + sample_impact(&weather) * 100.0).max(0.0)),
        };

        let capacity_mw = base_mw * CAPACITY_HEADROOM;
        let load_pct = round1(current_mw / capacity_mw * 100.0);
        let is_peak = load_pct > PEAK_THRESHOLD_PCT;
        let is_critical = load_pct > CRITICAL_THRESHOLD_PCT;
        let renewable_pct = renewable_pct(weather.solar, weather.temp);
        let tip = Tip::select(load_pct, weather.temp, hour);

        debug!(current_mw, load_pct, hour, tip = <&str>::from(tip), "public status composed");

        StatusSnapshot {
            current_mw,
            capacity_mw: round1(capacity_mw),
            load_pct,
            is_peak,
            is_critical,
            renewable_pct,
            weather: StatusWeather {
                temp: weather.temp,
                humidity: weather.humidity,
            },
            tip: tip.message().to_string(),
            co2_saved_tons: round1(renewable_pct * current_mw * CO2_FACTOR),
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::weather::{MockWeatherProvider, WeatherError, WeatherReading};
    use crate::ml::{LinearLoadModel, ModelMetadata, ModelType};
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(95.0, 30.0, 14, Tip::Critical)]
    #[case(95.0, 40.0, 23, Tip::Critical)]
    #[case(85.0, 35.0, 14, Tip::PeakHeat)]
    #[case(85.0, 30.0, 14, Tip::Peak)]
    #[case(85.0, 30.0, 23, Tip::Peak)]
    #[case(50.0, 30.0, 23, Tip::OffPeak)]
    #[case(50.0, 30.0, 5, Tip::OffPeak)]
    #[case(50.0, 30.0, 14, Tip::Stable)]
    #[case(80.0, 40.0, 6, Tip::Stable)]
    fn test_tip_priority(
        #[case] load_pct: f64,
        #[case] temp: f64,
        #[case] hour: u32,
        #[case] expected: Tip,
    ) {
        assert_eq!(Tip::select(load_pct, temp, hour), expected);
    }

    #[rstest]
    #[case(0, 0.78)]
    #[case(3, 0.78)]
    #[case(4, 0.80)]
    #[case(11, 1.05)]
    #[case(12, 1.22)]
    #[case(19, 1.18)]
    #[case(21, 1.08)]
    #[case(22, 0.92)]
    #[case(23, 0.92)]
    fn test_hour_buckets(#[case] hour: u32, #[case] expected: f64) {
        assert_eq!(hourly_multiplier(hour), expected);
    }

    #[test]
    fn test_formula_path_without_model() {
        let oracle = ModelOracle::unavailable();
        let weather = WeatherSample::new(30.0, 65.0, 500.0);
        let snap = StatusComposer::new(&oracle).compose_at(weather, 14, 2026, "14:00".into());

        let impact = sample_impact(&weather);
        let expected_mw = round1(17400.0 * 1.22 + impact * 100.0);
        assert_eq!(snap.current_mw, expected_mw);
        assert_eq!(snap.capacity_mw, 21750.0);
        assert_eq!(snap.load_pct, round1(expected_mw / 21750.0 * 100.0));
        assert!(snap.is_peak);
        assert!(snap.is_critical);
        assert_eq!(snap.tip, Tip::Critical.message());
        assert_eq!(snap.renewable_pct, 33.5);
        assert_eq!(snap.co2_saved_tons, round1(33.5 * expected_mw * 0.0005));
        assert_eq!(snap.timestamp, "14:00");
    }

    #[test]
    fn test_night_is_quiet() {
        let oracle = ModelOracle::unavailable();
        let snap = StatusComposer::new(&oracle).compose_at(
            WeatherSample::baseline(),
            23,
            2026,
            "23:10".into(),
        );
        assert_eq!(snap.current_mw, round1(17400.0 * 0.92));
        assert!(!snap.is_peak);
        assert_eq!(snap.tip, Tip::OffPeak.message());
    }

    #[test]
    fn test_model_path_scales_by_hour() {
        let model = LinearLoadModel::new(
            vec![0.0; 6],
            10000.0,
            ModelMetadata::new("flat", ModelType::LinearRegression),
        );
        let oracle = ModelOracle::from_model(Box::new(model));
        let snap = StatusComposer::new(&oracle).compose_at(
            WeatherSample::baseline(),
            9,
            2026,
            "09:00".into(),
        );
        assert_eq!(snap.current_mw, 10500.0);
        assert_eq!(snap.tip, Tip::Stable.message());
    }

    #[tokio::test]
    async fn test_compose_uses_live_weather() {
        let mut provider = MockWeatherProvider::new();
        provider.expect_latest().times(1).returning(|| {
            Ok(WeatherReading {
                temp: 33.3,
                humidity: 71.0,
            })
        });
        let oracle = ModelOracle::unavailable();
        let snap = StatusComposer::new(&oracle).compose(&provider).await;
        assert_eq!(snap.weather.temp, 33.3);
        assert_eq!(snap.weather.humidity, 71.0);
    }

    #[tokio::test]
    async fn test_compose_falls_back_on_weather_failure() {
        let mut provider = MockWeatherProvider::new();
        provider
            .expect_latest()
            .returning(|| Err(WeatherError::Empty));
        let oracle = ModelOracle::unavailable();
        let snap = StatusComposer::new(&oracle).compose(&provider).await;
        assert_eq!(snap.weather.temp, 30.0);
        assert_eq!(snap.weather.humidity, 65.0);
    }

    proptest! {
        #[test]
        fn renewable_never_exceeds_cap(solar in 0.0f64..1200.0, temp in -10.0f64..60.0) {
            let pct = renewable_pct(solar, temp);
            prop_assert!(pct <= MAX_RENEWABLE_PCT);
            prop_assert!(pct >= 0.0);
        }
    }
}
