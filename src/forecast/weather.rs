//! Live weather lookup (Open-Meteo)
//!
//! Only the most recent observed hour for one fixed point is needed. Any
//! failure degrades to a caller-chosen fallback reading.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::WeatherConfig;
use crate::domain::WeatherSample;
use crate::utils::round1;

/// Most recent temperature / humidity reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherReading {
    pub temp: f64,
    pub humidity: f64,
}

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("weather request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("weather API returned status {0}")]
    Status(u16),

    #[error("empty response from weather source")]
    Empty,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn latest(&self) -> Result<WeatherReading, WeatherError>;

    /// Human-readable identifier for health output
    fn describe(&self) -> String {
        "weather".to_string()
    }
}

/// Current weather as a full sample, or `fallback` if the lookup fails.
///
/// Irradiance is not observed; the fallback's solar value is always used.
pub async fn snapshot_or(provider: &dyn WeatherProvider, fallback: WeatherSample) -> WeatherSample {
    match provider.latest().await {
        Ok(reading) => WeatherSample::new(reading.temp, reading.humidity, fallback.solar),
        Err(e) => {
            warn!(error = %e, "weather fetch failed, using defaults");
            fallback
        }
    }
}

/// Open-Meteo hourly client for a fixed coordinate
pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
    latitude: f64,
    longitude: f64,
    lookback_hours: u32,
}

impl OpenMeteoClient {
    pub fn new(cfg: &WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.http_timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            latitude: cfg.latitude,
            longitude: cfg.longitude,
            lookback_hours: cfg.lookback_hours,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoClient {
    async fn latest(&self) -> Result<WeatherReading, WeatherError> {
        let url = format!("{}/forecast", self.base_url);
        debug!(%url, lat = self.latitude, lon = self.longitude, "fetching latest weather");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", self.latitude.to_string()),
                ("longitude", self.longitude.to_string()),
                ("hourly", "temperature_2m,relative_humidity_2m".to_string()),
                ("past_hours", self.lookback_hours.to_string()),
                ("forecast_hours", "1".to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(WeatherError::Status(response.status().as_u16()));
        }

        let body: OpenMeteoResponse = response.json().await?;
        body.hourly.latest().ok_or(WeatherError::Empty)
    }

    fn describe(&self) -> String {
        format!("open-meteo ({}, {})", self.latitude, self.longitude)
    }
}

#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    hourly: HourlySeries,
}

#[derive(Debug, Deserialize)]
struct HourlySeries {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    relative_humidity_2m: Vec<Option<f64>>,
}

impl HourlySeries {
    /// Last hour with both values present
    fn latest(&self) -> Option<WeatherReading> {
        (0..self.time.len()).rev().find_map(|i| {
            let temp = self.temperature_2m.get(i).copied().flatten()?;
            let humidity = self.relative_humidity_2m.get(i).copied().flatten()?;
            Some(WeatherReading {
                temp: round1(temp),
                humidity: round1(humidity),
            })
        })
    }
}
