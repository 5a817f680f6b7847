use axum::{extract::State, Json};
use tracing::info;

use crate::{
    api::{error::ApiError, extract::ValidatedJson},
    controller::AppState,
    forecast::{PolicyRequest, PolicyResponse},
};

/// POST /predict - per-city policy projection
pub async fn predict(
    State(st): State<AppState>,
    ValidatedJson(req): ValidatedJson<PolicyRequest>,
) -> Result<Json<PolicyResponse>, ApiError> {
    let resp = st.controller.policy(&req);
    info!(
        year = resp.year,
        cities = resp.breakdown.len(),
        total_mw = resp.total_mw,
        "policy prediction served"
    );
    Ok(Json(resp))
}
