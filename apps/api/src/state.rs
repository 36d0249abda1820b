use std::sync::Arc;

use crate::config::Config;
use crate::draws::{DrawLookupCache, LatestDrawResolver};
use crate::recommendation::RecommendationOrchestrator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Process-wide draw cache; the resolver and history walk share it.
    pub cache: Arc<DrawLookupCache>,
    pub resolver: Arc<LatestDrawResolver>,
    pub orchestrator: Arc<RecommendationOrchestrator>,
}
