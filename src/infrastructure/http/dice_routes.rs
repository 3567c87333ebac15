//! Dice API routes

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::dto::{AbilityRollDto, RollDisplayDto};
use crate::infrastructure::state::AppState;

/// Free-standing 4d6-drop-lowest roll; the sheet is never touched
pub async fn roll_dice(State(state): State<Arc<AppState>>) -> Json<AbilityRollDto> {
    let outcome = state.dice.roll_animated(&state.store, None).await;
    Json(outcome.to_dto())
}

/// What the dice display currently shows
pub async fn get_roll_display(State(state): State<Arc<AppState>>) -> Json<RollDisplayDto> {
    Json(state.dice.display().await.to_dto())
}
