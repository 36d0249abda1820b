pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::draws::handlers as draws;
use crate::recommendation::handlers as recommendation;
use crate::state::AppState;
use crate::statistics::handlers as statistics;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/draws/latest", get(draws::handle_latest_draw))
        .route("/api/v1/draws/:draw_no", get(draws::handle_get_draw))
        .route("/api/v1/statistics", get(statistics::handle_statistics))
        .route(
            "/api/v1/recommendations",
            post(recommendation::handle_recommend),
        )
        .with_state(state)
}
