//! Recommendation collaborator: the external step that turns a statistics
//! narrative plus constraints into candidate number sets.
//!
//! The collaborator is opaque and untrusted. Its output goes through
//! `check_set` and `normalize_sets` before anyone sees it.

use std::collections::HashSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, NO_GUARANTEE_INSTRUCTION};
use crate::llm_client::{LlmClient, LlmError};
use crate::models::draw::{in_range, PICK_COUNT};
use crate::recommendation::constraints::RecommendationConstraints;
use crate::recommendation::prompts::{RECOMMENDATION_PROMPT_TEMPLATE, RECOMMENDATION_SYSTEM_ROLE};

/// What the collaborator receives. The narrative is passed verbatim.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationRequest {
    pub narrative_text: String,
    pub include_numbers: Vec<u8>,
    pub exclude_numbers: Vec<u8>,
    pub set_count: usize,
}

/// One suggested combination. `rationale` is opaque text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedSet {
    pub numbers: Vec<u8>,
    #[serde(default)]
    pub rationale: String,
}

#[derive(Debug, Error)]
pub enum RecommenderError {
    #[error("recommendation call failed: {0}")]
    Call(String),

    #[error("recommendation reply was malformed: {0}")]
    Malformed(String),
}

/// The collaborator seam. Carried by the orchestrator as `Arc<dyn Recommender>`.
#[async_trait]
pub trait Recommender: Send + Sync {
    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<RecommendedSet>, RecommenderError>;
}

// ────────────────────────────────────────────────────────────────────────────
// LlmRecommender
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RecommendationReply {
    sets: Vec<RecommendedSet>,
}

/// Collaborator backed by the hosted language model.
pub struct LlmRecommender(pub LlmClient);

#[async_trait]
impl Recommender for LlmRecommender {
    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<RecommendedSet>, RecommenderError> {
        let prompt = build_prompt(request);
        let system = format!("{RECOMMENDATION_SYSTEM_ROLE} {JSON_ONLY_SYSTEM}");

        let reply: RecommendationReply =
            self.0
                .call_json(&prompt, &system)
                .await
                .map_err(|e| match e {
                    LlmError::Parse(e) => RecommenderError::Malformed(e.to_string()),
                    LlmError::EmptyContent => {
                        RecommenderError::Malformed("empty reply".to_string())
                    }
                    other => RecommenderError::Call(other.to_string()),
                })?;

        debug!("Collaborator returned {} sets", reply.sets.len());
        Ok(reply.sets)
    }
}

pub fn build_prompt(request: &RecommendationRequest) -> String {
    let include_rule = if request.include_numbers.is_empty() {
        "No numbers are required.".to_string()
    } else {
        format!(
            "Every set MUST contain all of: {}.",
            join_numbers(&request.include_numbers)
        )
    };
    let exclude_rule = if request.exclude_numbers.is_empty() {
        "No numbers are forbidden.".to_string()
    } else {
        format!(
            "No set may contain any of: {}.",
            join_numbers(&request.exclude_numbers)
        )
    };

    RECOMMENDATION_PROMPT_TEMPLATE
        .replace("{narrative}", &request.narrative_text)
        .replace("{set_count}", &request.set_count.to_string())
        .replace("{include_rule}", &include_rule)
        .replace("{exclude_rule}", &exclude_rule)
        .replace("{no_guarantee}", NO_GUARANTEE_INSTRUCTION)
}

// ────────────────────────────────────────────────────────────────────────────
// Output checks
// ────────────────────────────────────────────────────────────────────────────

/// A set is acceptable when it has 6 distinct numbers in 1-45, contains every
/// included number and none of the excluded ones.
pub fn check_set(
    set: &RecommendedSet,
    constraints: &RecommendationConstraints,
) -> Result<(), String> {
    if set.numbers.len() != PICK_COUNT {
        return Err(format!(
            "expected {PICK_COUNT} numbers, got {}",
            set.numbers.len()
        ));
    }

    let mut seen = HashSet::with_capacity(PICK_COUNT);
    for &n in &set.numbers {
        if !in_range(n) {
            return Err(format!("{n} is outside 1-45"));
        }
        if !seen.insert(n) {
            return Err(format!("{n} appears more than once"));
        }
    }

    if let Some(missing) = constraints
        .include_numbers
        .iter()
        .find(|&&n| !seen.contains(&n))
    {
        return Err(format!("required number {missing} is missing"));
    }
    if let Some(banned) = constraints
        .exclude_numbers
        .iter()
        .find(|&&n| seen.contains(&n))
    {
        return Err(format!("excluded number {banned} is present"));
    }

    Ok(())
}

/// Sorts each set ascending, drops repeated sets (first kept) and keeps at
/// most `limit`. Numbers themselves are not altered.
pub fn normalize_sets(sets: Vec<RecommendedSet>, limit: usize) -> Vec<RecommendedSet> {
    let mut seen: HashSet<Vec<u8>> = HashSet::new();
    sets.into_iter()
        .map(|mut set| {
            set.numbers.sort_unstable();
            set
        })
        .filter(|set| seen.insert(set.numbers.clone()))
        .take(limit)
        .collect()
}

fn join_numbers(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
