use axum::{extract::State, Json};

use crate::{
    controller::{AppState, InitialState},
    domain::StatusSnapshot,
};

/// GET /api/initial-state - dashboard bootstrap
pub async fn get_initial_state(State(st): State<AppState>) -> Json<InitialState> {
    Json(st.controller.initial_state().await)
}

/// GET /api/public/status - citizen view of the grid right now
pub async fn get_public_status(State(st): State<AppState>) -> Json<StatusSnapshot> {
    Json(st.controller.public_status().await)
}
