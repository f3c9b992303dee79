use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::state::AppState;

/// Shown next to the key form.
pub const KEY_NOTICE: &str = "Your GROQ API key stays in this session's memory and is only \
    sent to the GROQ API when you run an analysis. It is never written to disk.";

#[derive(Deserialize)]
pub struct SetKeyRequest {
    pub key: String,
}

#[derive(Serialize)]
pub struct KeyStatus {
    pub configured: bool,
    pub notice: &'static str,
}

/// GET /api/v1/key
/// Reports whether a key is set. The key itself is never returned.
pub async fn handle_key_status(State(state): State<AppState>) -> Json<KeyStatus> {
    let configured = state.session.read().await.key_store.is_configured();
    Json(KeyStatus {
        configured,
        notice: KEY_NOTICE,
    })
}

/// PUT /api/v1/key
pub async fn handle_set_key(
    State(state): State<AppState>,
    Json(req): Json<SetKeyRequest>,
) -> StatusCode {
    state.session.write().await.key_store.set(req.key);
    info!("API key updated");
    StatusCode::NO_CONTENT
}
