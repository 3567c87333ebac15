//! Theme API routes
//!
//! Lock order is always themes, then store.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::application::dto::{
    CustomColorRequestDto, SelectThemeRequestDto, ThemeDto, ThemeStateDto, ValidationError,
};
use crate::domain::value_objects::{HexColor, PaletteSlot};
use crate::infrastructure::state::AppState;

/// List the built-in themes
pub async fn list_themes(State(state): State<Arc<AppState>>) -> Json<Vec<ThemeDto>> {
    let themes = state.themes.read().await.predefined_themes();
    Json(themes.iter().map(ThemeDto::from).collect())
}

pub async fn get_current_theme(State(state): State<Arc<AppState>>) -> Json<ThemeDto> {
    let theme = state.store.read().await.theme();
    Json(ThemeDto::from(&theme))
}

/// Select a preset by id, or "custom"
pub async fn select_theme(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SelectThemeRequestDto>,
) -> Result<Json<ThemeDto>, (StatusCode, String)> {
    let mut themes = state.themes.write().await;
    let mut store = state.store.write().await;
    let theme = themes.select_by_id(&mut store, &req.theme_id).map_err(|e| match e {
        ValidationError::UnknownTheme(_) => (StatusCode::NOT_FOUND, e.to_string()),
        _ => (StatusCode::BAD_REQUEST, e.to_string()),
    })?;
    Ok(Json(ThemeDto::from(&theme)))
}

/// Current theme, the custom palette draft and whether custom mode is on
pub async fn get_custom_theme(State(state): State<Arc<AppState>>) -> Json<ThemeStateDto> {
    let themes = state.themes.read().await;
    let store = state.store.read().await;
    Json(ThemeStateDto {
        current: ThemeDto::from(&store.theme()),
        custom: ThemeDto::from(&themes.custom_theme()),
        custom_mode: themes.custom_mode(),
    })
}

/// Switch to the custom palette
pub async fn enable_custom_theme(State(state): State<Arc<AppState>>) -> Json<ThemeDto> {
    let mut themes = state.themes.write().await;
    let mut store = state.store.write().await;
    themes.enable_custom(&mut store);
    Json(ThemeDto::from(&store.theme()))
}

pub async fn update_custom_color(
    State(state): State<Arc<AppState>>,
    Path(slot): Path<String>,
    Json(req): Json<CustomColorRequestDto>,
) -> Result<Json<ThemeStateDto>, (StatusCode, String)> {
    let slot: PaletteSlot = slot.parse().map_err(|e| (StatusCode::BAD_REQUEST, e))?;
    let color: HexColor = req
        .color
        .parse()
        .map_err(|e| (StatusCode::BAD_REQUEST, ValidationError::from(e).to_string()))?;

    let mut themes = state.themes.write().await;
    let mut store = state.store.write().await;
    themes.update_custom_color(&mut store, slot, color);

    Ok(Json(ThemeStateDto {
        current: ThemeDto::from(&store.theme()),
        custom: ThemeDto::from(&themes.custom_theme()),
        custom_mode: themes.custom_mode(),
    }))
}
