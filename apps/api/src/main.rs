mod assist;
mod config;
mod document;
mod errors;
mod export;
mod fetch;
mod layout;
mod llm_client;
mod persistence;
mod render;
mod routes;
mod state;
mod style;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::document::store::DocumentStore;
use crate::document::Document;
use crate::export::clipboard::SystemClipboard;
use crate::fetch::images::PexelsClient;
use crate::fetch::HttpFetcher;
use crate::llm_client::GeminiClient;
use crate::persistence::fs_snapshots;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails only on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Résumé Studio v{}", env!("CARGO_PKG_VERSION"));

    // Restore the last saved session, if any
    let snapshots = fs_snapshots(&config.data_dir);
    let document = match snapshots.load() {
        Some(doc) => {
            info!("Restored saved document from {}", config.data_dir.display());
            doc
        }
        None => {
            info!("No saved document; starting from the default template");
            Document::default()
        }
    };

    // Initialize the assistant
    let assistant = GeminiClient::new(config.gemini_api_key.clone());
    if assistant.has_key() {
        info!("Assistant initialized (model: {})", llm_client::MODEL);
    } else {
        warn!("GEMINI_API_KEY is not set; assistant requests will fail with a key error");
    }

    let state = AppState {
        store: Arc::new(DocumentStore::new(document)),
        snapshots,
        assistant: Arc::new(assistant),
        fetcher: Arc::new(HttpFetcher::new(config.fetch_timeout)),
        images: Arc::new(PexelsClient::new(
            config.pexels_api_key.clone(),
            config.fetch_timeout,
        )),
        clipboard: Arc::new(SystemClipboard),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Single-user studio: bind to loopback only
    let addr: SocketAddr = format!("127.0.0.1:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
