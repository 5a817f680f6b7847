use serde::{Deserialize, Serialize};
use validator::Validate;

use super::tables::BASELINE;

/// Point-in-time weather reading used as model / formula input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    /// Air temperature (°C)
    pub temp: f64,
    /// Relative humidity (%)
    pub humidity: f64,
    /// Solar irradiance (W/m²)
    pub solar: f64,
}

impl WeatherSample {
    /// Irradiance assumed when the weather source has no solar reading
    pub const DEFAULT_SOLAR: f64 = 500.0;

    pub fn new(temp: f64, humidity: f64, solar: f64) -> Self {
        Self {
            temp,
            humidity,
            solar,
        }
    }

    /// Reading substituted on the dashboard bootstrap when the lookup fails
    pub fn initial_state_fallback() -> Self {
        Self::new(30.0, 55.0, Self::DEFAULT_SOLAR)
    }

    /// Reading substituted by the public status page when the lookup fails
    pub fn status_fallback() -> Self {
        Self::new(30.0, 65.0, Self::DEFAULT_SOLAR)
    }

    pub fn baseline() -> Self {
        Self::new(BASELINE.temp, BASELINE.humidity, BASELINE.solar)
    }
}

/// What-if weather overlay supplied by the operator dashboard
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct SimulationParams {
    #[validate(range(min = -10.0, max = 60.0))]
    #[serde(default = "default_sim_temp")]
    pub temp: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    #[serde(default = "default_sim_humidity")]
    pub humidity: f64,
    #[validate(range(min = 0.0, max = 1200.0))]
    #[serde(default = "default_sim_solar")]
    pub solar: f64,
}

fn default_sim_temp() -> f64 {
    30.0
}

fn default_sim_humidity() -> f64 {
    50.0
}

fn default_sim_solar() -> f64 {
    500.0
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            temp: default_sim_temp(),
            humidity: default_sim_humidity(),
            solar: default_sim_solar(),
        }
    }
}

impl From<SimulationParams> for WeatherSample {
    fn from(p: SimulationParams) -> Self {
        WeatherSample::new(p.temp, p.humidity, p.solar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulation_defaults_from_empty_body() {
        let params: SimulationParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params, SimulationParams::default());
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_simulation_params_out_of_range() {
        let params = SimulationParams {
            temp: 75.0,
            ..Default::default()
        };
        assert!(params.validate().is_err());

        let params = SimulationParams {
            solar: -1.0,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_fallbacks_differ_in_humidity() {
        assert_eq!(WeatherSample::initial_state_fallback().humidity, 55.0);
        assert_eq!(WeatherSample::status_fallback().humidity, 65.0);
        assert_eq!(WeatherSample::status_fallback().solar, 500.0);
    }
}
