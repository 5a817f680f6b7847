use anyhow::Result;
use chrono::{Datelike, Local};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::domain::tables::SENSITIVITY;
use crate::domain::{
    ForecastPoint, ForecastRange, MonthlyPoint, SensitivityWeights, SimulationParams,
    StatusSnapshot, WeatherSample,
};
use crate::forecast::{
    forecast_year, predict_policy, snapshot_or, ForecastBuilder, NoiseSource, OpenMeteoClient,
    PolicyRequest, PolicyResponse, StatusComposer, UniformNoise, WeatherProvider,
};
use crate::ml::ModelOracle;

#[derive(Clone)]
pub struct AppState {
    pub cfg: Config,
    pub controller: Arc<GridController>,
}

impl AppState {
    pub async fn new(cfg: Config) -> Result<Self> {
        let oracle = ModelOracle::load(&cfg.model);
        let weather = OpenMeteoClient::new(&cfg.weather)?;

        info!(
            model_online = oracle.available(),
            source = ?oracle.source(),
            weather = %weather.describe(),
            "grid controller initialised"
        );

        Ok(Self::with_parts(cfg, oracle, Arc::new(weather)))
    }

    pub fn with_parts(cfg: Config, oracle: ModelOracle, weather: Arc<dyn WeatherProvider>) -> Self {
        let controller = Arc::new(GridController {
            oracle: Arc::new(oracle),
            weather,
        });
        Self { cfg, controller }
    }
}

/// Dashboard bootstrap payload
#[derive(Debug, Clone, Serialize)]
pub struct InitialState {
    pub weather: WeatherSample,
    pub weights: SensitivityWeights,
    pub system_status: &'static str,
    pub model_online: bool,
}

/// Request-level entry point; every call computes from scratch.
pub struct GridController {
    pub oracle: Arc<ModelOracle>,
    pub weather: Arc<dyn WeatherProvider>,
}

impl GridController {
    pub fn model_online(&self) -> bool {
        self.oracle.available()
    }

    pub async fn initial_state(&self) -> InitialState {
        let weather =
            snapshot_or(self.weather.as_ref(), WeatherSample::initial_state_fallback()).await;
        InitialState {
            weather,
            weights: SENSITIVITY,
            system_status: "SECURE",
            model_online: self.model_online(),
        }
    }

    pub fn forecast(
        &self,
        range: ForecastRange,
        offset: u32,
        params: Option<&SimulationParams>,
    ) -> Vec<ForecastPoint> {
        self.forecast_with(range, offset, params, &mut UniformNoise::default())
    }

    pub fn forecast_with(
        &self,
        range: ForecastRange,
        offset: u32,
        params: Option<&SimulationParams>,
        noise: &mut dyn NoiseSource,
    ) -> Vec<ForecastPoint> {
        ForecastBuilder::new(&self.oracle, current_year()).build_range(range, offset, params, noise)
    }

    pub fn annual_forecast(&self, year: i32) -> Vec<MonthlyPoint> {
        forecast_year(&self.oracle, year)
    }

    pub fn current_year_forecast(&self) -> Vec<MonthlyPoint> {
        self.annual_forecast(current_year())
    }

    pub fn next_year_forecast(&self) -> Vec<MonthlyPoint> {
        self.annual_forecast(current_year() + 1)
    }

    pub fn policy(&self, req: &PolicyRequest) -> PolicyResponse {
        predict_policy(&self.oracle, req)
    }

    pub async fn public_status(&self) -> StatusSnapshot {
        StatusComposer::new(&self.oracle)
            .compose(self.weather.as_ref())
            .await
    }
}

fn current_year() -> i32 {
    Local::now().year()
}
