use axum::{extract::State, response::Html};

use crate::preview::render_page;
use crate::state::AppState;

/// GET /preview
pub async fn preview_handler(State(state): State<AppState>) -> Html<String> {
    let session = state.session.read().await;
    Html(render_page(&session.resume))
}
