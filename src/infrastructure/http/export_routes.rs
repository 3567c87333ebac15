//! Export API routes

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use std::sync::Arc;

use crate::application::dto::ExportQueryDto;
use crate::application::services::{ExportError, ExportFormat};
use crate::infrastructure::state::AppState;

/// Download the sheet as a file (`?format=text|json`, default text)
pub async fn export_sheet(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ExportQueryDto>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let format = match query.format.as_deref() {
        Some(raw) => raw
            .parse::<ExportFormat>()
            .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?,
        None => ExportFormat::default(),
    };

    let (sheet, theme) = {
        let store = state.store.read().await;
        (store.character(), store.theme())
    };

    let file = state.export.export(&sheet, &theme, format).map_err(|e| match e {
        ExportError::UnsupportedFormat(_) | ExportError::NoRenderer(_) => {
            (StatusCode::BAD_REQUEST, e.to_string())
        }
        ExportError::Render(_) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.file_name),
            ),
        ],
        file.bytes,
    ))
}
