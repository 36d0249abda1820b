//! Axum route handlers for draw lookups.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::errors::AppError;
use crate::models::ProcessedDraw;
use crate::state::AppState;

/// GET /api/v1/draws/latest
pub async fn handle_latest_draw(
    State(state): State<AppState>,
) -> Result<Json<ProcessedDraw>, AppError> {
    let draw = state.resolver.resolve_latest().await?;
    Ok(Json(draw.into()))
}

/// GET /api/v1/draws/:draw_no
pub async fn handle_get_draw(
    State(state): State<AppState>,
    Path(draw_no): Path<u32>,
) -> Result<Json<ProcessedDraw>, AppError> {
    let draw = state
        .cache
        .get(draw_no, state.config.lookup.history_ttl)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Draw #{draw_no} not found")))?;

    Ok(Json(draw.into()))
}
