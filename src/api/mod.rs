pub mod error;
pub mod extract;
pub mod forecast;
pub mod health;
pub mod predict;
pub mod status;

use axum::{
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::{config::Config, controller::AppState};

pub fn router(state: AppState, cfg: &Config) -> Router {
    let mut router = Router::new()
        .route("/api/initial-state", get(status::get_initial_state))
        .route(
            "/api/forecast",
            get(forecast::get_forecast).post(forecast::simulate_forecast),
        )
        .route("/api/forecast/yearly", get(forecast::get_yearly))
        .route("/api/forecast/current-year", get(forecast::get_current_year))
        .route("/api/public/status", get(status::get_public_status))
        .route("/predict", post(predict::predict))
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness_check))
        .route("/health/ready", get(health::readiness_check))
        .with_state(state);

    if cfg.server.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(axum::extract::DefaultBodyLimit::max(1024 * 1024))
                .layer(TimeoutLayer::new(Duration::from_secs(
                    cfg.server.request_timeout_secs,
                ))),
        )
        .layer(TraceLayer::new_for_http())
}
