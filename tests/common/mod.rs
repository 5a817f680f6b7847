#![allow(dead_code)]
use std::sync::Arc;

use async_trait::async_trait;
use axum::{body::Body, http::Request, Router};
use grid_oversight::{
    api,
    config::Config,
    controller::AppState,
    forecast::{WeatherError, WeatherProvider, WeatherReading},
    ml::ModelOracle,
};

/// Weather source returning a fixed reading, or failing every call
pub struct FixedWeather(pub Option<WeatherReading>);

#[async_trait]
impl WeatherProvider for FixedWeather {
    async fn latest(&self) -> Result<WeatherReading, WeatherError> {
        self.0.ok_or(WeatherError::Empty)
    }

    fn describe(&self) -> String {
        "fixed".to_string()
    }
}

pub fn state(oracle: ModelOracle, reading: Option<WeatherReading>) -> AppState {
    AppState::with_parts(Config::default(), oracle, Arc::new(FixedWeather(reading)))
}

pub fn app(oracle: ModelOracle, reading: Option<WeatherReading>) -> Router {
    let st = state(oracle, reading);
    let cfg = st.cfg.clone();
    api::router(st, &cfg)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
