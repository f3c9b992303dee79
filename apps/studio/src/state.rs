use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::export::raster::{CaptureOptions, Rasterizer};
use crate::llm_client::Generator;
use crate::session::Session;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The single editing session. Handlers clone what they need out of it
    /// before awaiting on the network or the rasterizer.
    pub session: Arc<RwLock<Session>>,
    /// Generation endpoint. Default: `LlmClient` against GROQ.
    pub generator: Arc<dyn Generator>,
    /// Preview capture backend. Default: headless Chromium.
    pub rasterizer: Arc<dyn Rasterizer>,
    pub capture: CaptureOptions,
    pub config: Config,
}
