//! HTTP REST API routes

mod dice_routes;
mod export_routes;
mod settings_routes;
mod sheet_routes;
mod theme_routes;

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::infrastructure::state::AppState;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Sheet routes
        .route("/api/sheet", get(sheet_routes::get_sheet))
        .route("/api/sheet", put(sheet_routes::import_sheet))
        .route("/api/sheet/reset", post(sheet_routes::reset_sheet))
        .route(
            "/api/sheet/abilities/{ability}",
            put(sheet_routes::set_ability_score),
        )
        .route(
            "/api/sheet/abilities/{ability}/roll",
            post(sheet_routes::roll_ability),
        )
        .route(
            "/api/sheet/proficiency-bonus",
            put(sheet_routes::set_proficiency_bonus),
        )
        .route(
            "/api/sheet/skills/{name}/proficiency",
            post(sheet_routes::toggle_skill_proficiency),
        )
        .route(
            "/api/sheet/saving-throws/{ability}/proficiency",
            post(sheet_routes::toggle_saving_throw_proficiency),
        )
        // Export
        .route("/api/sheet/export", get(export_routes::export_sheet))
        // Dice
        .route("/api/dice/roll", post(dice_routes::roll_dice))
        .route("/api/dice/display", get(dice_routes::get_roll_display))
        // Themes
        .route("/api/themes", get(theme_routes::list_themes))
        .route("/api/themes/current", get(theme_routes::get_current_theme))
        .route("/api/themes/current", put(theme_routes::select_theme))
        .route("/api/themes/custom", get(theme_routes::get_custom_theme))
        .route("/api/themes/custom", post(theme_routes::enable_custom_theme))
        .route(
            "/api/themes/custom/colors/{slot}",
            put(theme_routes::update_custom_color),
        )
        // Auto-fill and settings
        .route("/api/auto-fill", get(settings_routes::get_auto_fill))
        .route("/api/auto-fill", put(settings_routes::set_auto_fill))
        .route("/api/auto-fill/toggle", post(settings_routes::toggle_auto_fill))
        .route("/api/settings", get(settings_routes::get_settings))
}
