//! Character sheet API routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::application::dto::{
    parse_score, AbilityRollDto, AbilityScoreRequestDto, CharacterSheetDto,
    ProficiencyBonusRequestDto, ProficiencyToggledDto,
};
use crate::application::services::StoreError;
use crate::domain::entities::CharacterSheet;
use crate::domain::services::derived;
use crate::domain::value_objects::Ability;
use crate::infrastructure::state::AppState;

fn parse_ability(raw: &str) -> Result<Ability, (StatusCode, String)> {
    raw.parse::<Ability>()
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))
}

/// Get the current sheet
pub async fn get_sheet(State(state): State<Arc<AppState>>) -> Json<CharacterSheetDto> {
    let sheet = state.store.read().await.character();
    Json(CharacterSheetDto::from(&sheet))
}

/// Import a whole sheet: validate, derive, replace
pub async fn import_sheet(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<CharacterSheetDto>, (StatusCode, String)> {
    let sheet = CharacterSheetDto::parse_sheet(&body)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let mut store = state.store.write().await;
    store.replace_character(derived(sheet));
    Ok(Json(CharacterSheetDto::from(&store.character())))
}

/// Start over from the blank template
pub async fn reset_sheet(State(state): State<Arc<AppState>>) -> Json<CharacterSheetDto> {
    let mut store = state.store.write().await;
    store.replace_character(derived(CharacterSheet::default()));
    Json(CharacterSheetDto::from(&store.character()))
}

pub async fn set_ability_score(
    State(state): State<Arc<AppState>>,
    Path(ability): Path<String>,
    Json(req): Json<AbilityScoreRequestDto>,
) -> Result<Json<CharacterSheetDto>, (StatusCode, String)> {
    let ability = parse_ability(&ability)?;
    let score =
        parse_score(ability, &req.score).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let mut store = state.store.write().await;
    store.set_ability_score(ability, score);
    Ok(Json(CharacterSheetDto::from(&store.character())))
}

/// Roll 4d6-drop-lowest for an ability; applied when auto-fill is on
pub async fn roll_ability(
    State(state): State<Arc<AppState>>,
    Path(ability): Path<String>,
) -> Result<Json<AbilityRollDto>, (StatusCode, String)> {
    let ability = parse_ability(&ability)?;
    let outcome = state.dice.roll_animated(&state.store, Some(ability)).await;
    Ok(Json(outcome.to_dto()))
}

pub async fn set_proficiency_bonus(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ProficiencyBonusRequestDto>,
) -> Json<CharacterSheetDto> {
    let mut store = state.store.write().await;
    store.set_proficiency_bonus(req.bonus);
    Json(CharacterSheetDto::from(&store.character()))
}

pub async fn toggle_skill_proficiency(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<ProficiencyToggledDto>, (StatusCode, String)> {
    let mut store = state.store.write().await;
    let proficient = store.toggle_skill_proficiency(&name).map_err(|e| match e {
        StoreError::SkillNotFound(_) => (StatusCode::NOT_FOUND, e.to_string()),
    })?;

    Ok(Json(ProficiencyToggledDto {
        proficient,
        sheet: CharacterSheetDto::from(&store.character()),
    }))
}

pub async fn toggle_saving_throw_proficiency(
    State(state): State<Arc<AppState>>,
    Path(ability): Path<String>,
) -> Result<Json<ProficiencyToggledDto>, (StatusCode, String)> {
    let ability = parse_ability(&ability)?;
    let mut store = state.store.write().await;
    let proficient = store.toggle_saving_throw_proficiency(ability);

    Ok(Json(ProficiencyToggledDto {
        proficient,
        sheet: CharacterSheetDto::from(&store.character()),
    }))
}
