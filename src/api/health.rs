use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::controller::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    timestamp: chrono::DateTime<chrono::Utc>,
    checks: HealthChecks,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    model: ComponentHealth,
    weather: ComponentHealth,
}

/// Health status of a component
#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

impl ComponentHealth {
    fn healthy(detail: impl Into<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            detail: Some(detail.into()),
        }
    }

    fn degraded(detail: impl Into<String>) -> Self {
        Self {
            status: "degraded".to_string(),
            detail: Some(detail.into()),
        }
    }
}

fn check_model(state: &AppState) -> ComponentHealth {
    let oracle = &state.controller.oracle;
    if oracle.available() {
        ComponentHealth::healthy(format!("{:?}", oracle.source()))
    } else {
        ComponentHealth::degraded("no model loaded, physics fallback active")
    }
}

/// GET /health
///
/// A missing model degrades the report; the status code stays 200.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let model = check_model(&state);
    let weather = ComponentHealth::healthy(state.controller.weather.describe());

    let status = if model.status == "healthy" {
        "healthy"
    } else {
        "degraded"
    };

    let response = HealthResponse {
        status: status.to_string(),
        timestamp: chrono::Utc::now(),
        checks: HealthChecks { model, weather },
    };

    tracing::debug!(status, "Health check completed");
    (StatusCode::OK, Json(response))
}

/// GET /health/ready - Readiness probe
pub async fn readiness_check() -> impl IntoResponse {
    StatusCode::OK
}

/// GET /health/live - Liveness probe
pub async fn liveness_check() -> impl IntoResponse {
    StatusCode::OK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_health_healthy() {
        let health = ComponentHealth::healthy("native");
        assert_eq!(health.status, "healthy");
        assert_eq!(health.detail.as_deref(), Some("native"));
    }

    #[test]
    fn test_component_health_degraded() {
        let health = ComponentHealth::degraded("no model");
        assert_eq!(health.status, "degraded");
    }
}
