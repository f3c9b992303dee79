//! Axum route handlers for the Analysis API.

use axum::{extract::State, Json};

use crate::analysis::client::{analyze_grammar_and_ats, score_resume, GrammarAtsReport, ResumeScore};
use crate::errors::AppError;
use crate::models::resume::ResumeData;
use crate::state::AppState;

/// Copies the document and key out of the session so no lock is held across the network call.
async fn snapshot(state: &AppState) -> (ResumeData, String) {
    let session = state.session.read().await;
    (session.resume.clone(), session.key_store.get().to_string())
}

/// POST /api/v1/analysis/grammar-ats
pub async fn handle_grammar_ats(
    State(state): State<AppState>,
) -> Result<Json<GrammarAtsReport>, AppError> {
    let (resume, api_key) = snapshot(&state).await;
    let report = analyze_grammar_and_ats(&resume, &api_key, state.generator.as_ref()).await?;
    Ok(Json(report))
}

/// POST /api/v1/analysis/score
pub async fn handle_score(State(state): State<AppState>) -> Result<Json<ResumeScore>, AppError> {
    let (resume, api_key) = snapshot(&state).await;
    let score = score_resume(&resume, &api_key, state.generator.as_ref()).await?;
    Ok(Json(score))
}
