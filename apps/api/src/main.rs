mod config;
mod cv;
mod errors;
mod llm_client;
mod models;
mod render;
mod routes;
mod state;
mod usage;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::cv::pipeline::CvPipeline;
use crate::llm_client::ChatCompletionsClient;
use crate::render::HtmlRenderer;
use crate::routes::build_router;
use crate::state::AppState;
use crate::usage::Unmetered;

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

    info!("Starting CVSmith API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize model gateway; the key is handed over explicitly, never read later
    let llm = ChatCompletionsClient::from_config(&config)?;
    info!(
        "Model gateway initialized (model: {}, timeout: {:?})",
        llm.model(),
        config.llm_timeout
    );

    let pipeline = CvPipeline::new(Arc::new(llm), config.llm_timeout);

    // Build app state
    let state = AppState {
        config: config.clone(),
        pipeline,
        renderer: Arc::new(HtmlRenderer),
        usage_gate: Arc::new(Unmetered),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the web client's domain

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
