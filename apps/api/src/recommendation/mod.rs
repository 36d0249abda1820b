// Number recommendations: constraint validation, the collaborator seam and
// the pipeline that feeds it statistics.

pub mod constraints;
pub mod handlers;
pub mod orchestrator;
pub mod prompts;
pub mod recommender;

pub use orchestrator::RecommendationOrchestrator;
pub use recommender::LlmRecommender;
