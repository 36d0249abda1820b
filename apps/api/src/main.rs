mod config;
mod draws;
mod errors;
mod llm_client;
mod models;
mod recommendation;
mod routes;
mod state;
mod statistics;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::draws::{DrawLookupCache, HistoryFetcher, HttpDrawSource, LatestDrawResolver};
use crate::llm_client::LlmClient;
use crate::recommendation::{LlmRecommender, RecommendationOrchestrator};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Lotto API v{}", env!("CARGO_PKG_VERSION"));

    // Draw source + shared lookup cache
    let source = Arc::new(HttpDrawSource::new(config.draw_source_url.clone())?);
    let retention = config.lookup.probe_ttl.max(config.lookup.history_ttl);
    let cache = Arc::new(DrawLookupCache::new(source, retention));
    info!(
        "Draw source: {} (probe buffer {}, concurrency {})",
        config.draw_source_url, config.lookup.probe_buffer, config.lookup.concurrency
    );

    let resolver = Arc::new(LatestDrawResolver::new(cache.clone(), &config.lookup));
    let history = Arc::new(HistoryFetcher::new(cache.clone(), &config.lookup));

    // Recommendation collaborator
    let llm = LlmClient::new(config.anthropic_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);
    let orchestrator = Arc::new(RecommendationOrchestrator::new(
        resolver.clone(),
        history,
        Arc::new(LlmRecommender(llm)),
    ));

    let state = AppState {
        config: config.clone(),
        cache,
        resolver,
        orchestrator,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
