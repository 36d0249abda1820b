//! Axum route handlers for the Recommendation API.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::recommendation::orchestrator::RecommendationResponse;
use crate::state::AppState;
use crate::statistics::handlers::DEFAULT_WINDOW;

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    #[serde(default = "default_window")]
    pub window: u32,
    /// Raw comma-separated list, e.g. "7, 14, 21".
    pub include_numbers: Option<String>,
    pub exclude_numbers: Option<String>,
}

fn default_window() -> u32 {
    DEFAULT_WINDOW
}

/// POST /api/v1/recommendations
///
/// Statistics over the newest `window` draws plus five checked, sorted sets.
pub async fn handle_recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> Result<Json<RecommendationResponse>, AppError> {
    let response = state
        .orchestrator
        .recommend(
            request.window,
            request.include_numbers.as_deref(),
            request.exclude_numbers.as_deref(),
        )
        .await?;

    Ok(Json(response))
}
