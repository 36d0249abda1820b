//! Axum route handlers for the Statistics API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::state::AppState;
use crate::statistics::StatisticsSummary;

/// Window used when the caller does not name one.
pub const DEFAULT_WINDOW: u32 = 24;

#[derive(Debug, Deserialize)]
pub struct WindowQuery {
    pub window: Option<u32>,
}

/// GET /api/v1/statistics?window=N
pub async fn handle_statistics(
    State(state): State<AppState>,
    Query(params): Query<WindowQuery>,
) -> Result<Json<StatisticsSummary>, AppError> {
    let window = params.window.unwrap_or(DEFAULT_WINDOW);
    let summary = state.orchestrator.analyze(window).await?;
    Ok(Json(summary))
}
