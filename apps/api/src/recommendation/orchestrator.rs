//! Recommendation pipeline: statistics over recent draws, handed to the collaborator.
//!
//! Flow: validate constraints → resolve latest draw → check window →
//!       fetch history → aggregate → collaborator → check + normalize → return.
//!
//! Strictly linear: any hard failure aborts the remaining steps. The only
//! repeat is a single re-request when the collaborator's reply breaks the
//! set invariants.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::draws::{HistoryFetcher, LatestDrawResolver};
use crate::errors::AppError;
use crate::models::ProcessedDraw;
use crate::recommendation::constraints::{validate_constraints, RecommendationConstraints};
use crate::recommendation::recommender::{
    check_set, normalize_sets, RecommendationRequest, RecommendedSet, Recommender,
};
use crate::statistics::{aggregate, StatisticsSummary};

/// Fewer draws than this and the statistics mean nothing. Not configurable.
pub const MIN_WINDOW: u32 = 5;
/// Sets requested from the collaborator in "scientific" mode.
pub const SCIENTIFIC_SET_COUNT: usize = 5;
/// One initial request plus one re-request on invalid output.
const MAX_COLLABORATOR_ATTEMPTS: u32 = 2;

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationResponse {
    pub statistics: StatisticsSummary,
    pub constraints: RecommendationConstraints,
    pub sets: Vec<RecommendedSet>,
}

pub struct RecommendationOrchestrator {
    resolver: Arc<LatestDrawResolver>,
    history: Arc<HistoryFetcher>,
    recommender: Arc<dyn Recommender>,
}

impl RecommendationOrchestrator {
    pub fn new(
        resolver: Arc<LatestDrawResolver>,
        history: Arc<HistoryFetcher>,
        recommender: Arc<dyn Recommender>,
    ) -> Self {
        Self {
            resolver,
            history,
            recommender,
        }
    }

    /// Statistics over the newest `window` draws.
    pub async fn analyze(&self, window: u32) -> Result<StatisticsSummary, AppError> {
        if window < MIN_WINDOW {
            return Err(AppError::WindowTooSmall {
                requested: window,
                minimum: MIN_WINDOW,
            });
        }

        let latest = self.resolver.resolve_latest().await?;

        if window > latest.draw_no {
            return Err(AppError::Validation(format!(
                "window must be between {MIN_WINDOW} and {}, got {window}",
                latest.draw_no
            )));
        }

        let draws = self.history.fetch_backward(latest.draw_no, window).await;
        if draws.len() < MIN_WINDOW as usize {
            return Err(AppError::InsufficientHistory {
                retrieved: draws.len(),
                minimum: MIN_WINDOW as usize,
            });
        }

        let processed: Vec<ProcessedDraw> = draws.into_iter().map(ProcessedDraw::from).collect();
        let summary = aggregate(&processed);
        info!(
            "Analyzed {} draws ending at #{} (average sum {:.1}, parity {})",
            summary.window_size, latest.draw_no, summary.average_sum, summary.dominant_parity_ratio
        );

        Ok(summary)
    }

    /// Full pipeline: statistics plus `SCIENTIFIC_SET_COUNT` checked, sorted sets.
    pub async fn recommend(
        &self,
        window: u32,
        include_raw: Option<&str>,
        exclude_raw: Option<&str>,
    ) -> Result<RecommendationResponse, AppError> {
        let constraints = validate_constraints(include_raw, exclude_raw)?;

        let statistics = self.analyze(window).await?;

        let request = RecommendationRequest {
            narrative_text: statistics.narrative_text.clone(),
            include_numbers: constraints.include_numbers.iter().copied().collect(),
            exclude_numbers: constraints.exclude_numbers.iter().copied().collect(),
            set_count: SCIENTIFIC_SET_COUNT,
        };

        let sets = self.request_valid_sets(&request, &constraints).await?;
        info!("Returning {} recommended sets", sets.len());

        Ok(RecommendationResponse {
            statistics,
            constraints,
            sets,
        })
    }

    async fn request_valid_sets(
        &self,
        request: &RecommendationRequest,
        constraints: &RecommendationConstraints,
    ) -> Result<Vec<RecommendedSet>, AppError> {
        let mut last_problem = String::new();

        for attempt in 1..=MAX_COLLABORATOR_ATTEMPTS {
            let sets = self.recommender.recommend(request).await?;

            let problem = if sets.is_empty() {
                Some("no sets returned".to_string())
            } else {
                sets.iter().enumerate().find_map(|(i, set)| {
                    check_set(set, constraints)
                        .err()
                        .map(|e| format!("set {}: {e}", i + 1))
                })
            };

            match problem {
                None => {
                    let normalized = normalize_sets(sets, request.set_count);
                    if normalized.len() < request.set_count {
                        warn!(
                            "Collaborator produced {} distinct sets, {} requested",
                            normalized.len(),
                            request.set_count
                        );
                    }
                    return Ok(normalized);
                }
                Some(problem) => {
                    warn!(
                        "Collaborator attempt {attempt}/{MAX_COLLABORATOR_ATTEMPTS} rejected: {problem}"
                    );
                    last_problem = problem;
                }
            }
        }

        Err(AppError::Collaborator(format!(
            "invalid recommendations after {MAX_COLLABORATOR_ATTEMPTS} attempts: {last_problem}"
        )))
    }
}
