use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::dto::AutoFillDto;
use crate::domain::value_objects::AppSettings;
use crate::infrastructure::state::AppState;

pub async fn get_settings(State(state): State<Arc<AppState>>) -> Json<AppSettings> {
    Json(state.settings.clone())
}

pub async fn get_auto_fill(State(state): State<Arc<AppState>>) -> Json<AutoFillDto> {
    let enabled = state.store.read().await.auto_fill_enabled();
    Json(AutoFillDto { enabled })
}

pub async fn toggle_auto_fill(State(state): State<Arc<AppState>>) -> Json<AutoFillDto> {
    let enabled = state.store.write().await.toggle_auto_fill();
    Json(AutoFillDto { enabled })
}

pub async fn set_auto_fill(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AutoFillDto>,
) -> Json<AutoFillDto> {
    state.store.write().await.set_auto_fill(req.enabled);
    Json(req)
}
