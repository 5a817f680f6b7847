use crate::domain::tables::{BASELINE, SENSITIVITY};
use crate::domain::WeatherSample;
use crate::utils::round3;

/// Load adjustment (MW-scale) for weather deviating from the Mumbai baseline.
///
/// Linear in each driver and exactly zero at the baseline reading.
pub fn weather_impact(temp: f64, humidity: f64, solar: f64) -> f64 {
    let d_temp = (temp - BASELINE.temp) * SENSITIVITY.temp;
    let d_humid = (humidity - BASELINE.humidity) / 10.0 * SENSITIVITY.humidity;
    let d_solar = (solar - BASELINE.solar) * SENSITIVITY.solar;
    round3(d_temp + d_humid + d_solar)
}

pub fn sample_impact(sample: &WeatherSample) -> f64 {
    weather_impact(sample.temp, sample.humidity, sample.solar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_at_baseline() {
        assert_eq!(weather_impact(28.0, 68.0, 500.0), 0.0);
        assert_eq!(sample_impact(&WeatherSample::baseline()), 0.0);
    }

    #[test]
    fn test_known_values() {
        // +2 °C, +10 % RH, -100 W/m²
        assert_eq!(weather_impact(30.0, 78.0, 400.0), 6.2);
        assert_eq!(weather_impact(30.0, 50.0, 500.0), 1.5);
    }

    proptest! {
        #[test]
        fn impact_is_linear_in_temperature(
            t in -10.0f64..60.0,
            h in 0.0f64..100.0,
            s in 0.0f64..1200.0,
            dt in 0.1f64..10.0,
        ) {
            let step = weather_impact(t + dt, h, s) - weather_impact(t, h, s);
            prop_assert!((step - dt * SENSITIVITY.temp).abs() < 2e-3);
        }

        #[test]
        fn impact_is_linear_in_humidity(
            t in -10.0f64..60.0,
            h in 0.0f64..90.0,
            s in 0.0f64..1200.0,
            dh in 0.1f64..10.0,
        ) {
            let step = weather_impact(t, h + dh, s) - weather_impact(t, h, s);
            prop_assert!((step - dh / 10.0 * SENSITIVITY.humidity).abs() < 2e-3);
        }

        #[test]
        fn impact_is_linear_in_solar(
            t in -10.0f64..60.0,
            h in 0.0f64..100.0,
            s in 0.0f64..1100.0,
            ds in 1.0f64..100.0,
        ) {
            let step = weather_impact(t, h, s + ds) - weather_impact(t, h, s);
            prop_assert!((step - ds * SENSITIVITY.solar).abs() < 2e-3);
        }
    }
}
