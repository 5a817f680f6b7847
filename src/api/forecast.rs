use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::debug;
use validator::Validate;

use crate::{
    api::{
        error::ApiError,
        extract::{ValidatedJson, ValidatedQuery},
    },
    controller::AppState,
    domain::{ForecastPoint, ForecastRange, MonthlyPoint, SimulationParams},
    forecast::MAX_OFFSET,
};

fn default_range() -> String {
    ForecastRange::NextDay.to_string()
}

#[derive(Debug, Deserialize, Validate)]
pub struct ForecastQuery {
    #[serde(default = "default_range")]
    pub range: String,
    #[serde(default)]
    #[validate(range(max = MAX_OFFSET))]
    pub offset: u32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ForecastRequest {
    #[serde(default = "default_range")]
    pub range: String,
    #[serde(default)]
    #[validate(range(max = MAX_OFFSET))]
    pub offset: u32,
    #[validate(nested)]
    pub params: Option<SimulationParams>,
}

fn parse_range(key: &str) -> Result<ForecastRange, ApiError> {
    ForecastRange::parse(key).ok_or_else(|| ApiError::BadRequest(format!("unknown range '{key}'")))
}

/// GET /api/forecast?range=&offset=
pub async fn get_forecast(
    State(st): State<AppState>,
    ValidatedQuery(q): ValidatedQuery<ForecastQuery>,
) -> Result<Json<Vec<ForecastPoint>>, ApiError> {
    let range = parse_range(&q.range)?;
    debug!(%range, offset = q.offset, "forecast requested");
    Ok(Json(st.controller.forecast(range, q.offset, None)))
}

/// POST /api/forecast - what-if forecast with simulated weather
pub async fn simulate_forecast(
    State(st): State<AppState>,
    ValidatedJson(req): ValidatedJson<ForecastRequest>,
) -> Result<Json<Vec<ForecastPoint>>, ApiError> {
    let range = parse_range(&req.range)?;
    debug!(%range, offset = req.offset, simulated = req.params.is_some(), "forecast requested");
    Ok(Json(
        st.controller
            .forecast(range, req.offset, req.params.as_ref()),
    ))
}

/// GET /api/forecast/yearly - next calendar year
pub async fn get_yearly(State(st): State<AppState>) -> Json<Vec<MonthlyPoint>> {
    Json(st.controller.next_year_forecast())
}

/// GET /api/forecast/current-year
pub async fn get_current_year(State(st): State<AppState>) -> Json<Vec<MonthlyPoint>> {
    Json(st.controller.current_year_forecast())
}
