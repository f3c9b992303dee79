mod analysis;
mod config;
mod editor;
mod errors;
mod export;
mod keystore;
mod llm_client;
mod models;
mod preview;
mod routes;
mod session;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::export::raster::{CaptureOptions, ChromeRasterizer};
use crate::keystore::KeyStore;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::session::Session;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Studio v{}", env!("CARGO_PKG_VERSION"));

    let llm = LlmClient::new(config.groq_api_url.clone(), config.groq_model.clone());
    info!("LLM client initialized (model: {})", llm.model());

    let rasterizer = ChromeRasterizer::new(config.chrome_bin.clone());
    info!("Preview capture via '{}'", config.chrome_bin);

    let key_store = KeyStore::new(config.groq_api_key.clone());
    if key_store.is_configured() {
        info!("API key seeded from environment");
    }

    let state = AppState {
        session: Arc::new(RwLock::new(Session::new(key_store))),
        generator: Arc::new(llm),
        rasterizer: Arc::new(rasterizer),
        capture: CaptureOptions::new(config.capture_viewport_height),
        config: config.clone(),
    };

    // Loopback only: the session is single-user and unauthenticated.
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    info!("Listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
