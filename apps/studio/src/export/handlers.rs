//! Axum route handlers for PDF export.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::export::{export_to_pdf, DEFAULT_FILE_NAME};
use crate::preview::RESUME_CONTAINER_ID;
use crate::state::AppState;

/// Every field is optional; a POST without a body exports the whole resume.
#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    #[serde(default = "default_element_id")]
    pub element_id: String,
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

fn default_element_id() -> String {
    RESUME_CONTAINER_ID.to_string()
}

fn default_file_name() -> String {
    DEFAULT_FILE_NAME.to_string()
}

impl Default for ExportRequest {
    fn default() -> Self {
        Self {
            element_id: default_element_id(),
            file_name: default_file_name(),
        }
    }
}

/// POST /api/v1/export
/// Responds with the PDF as an attachment, or 204 when the container does not exist.
pub async fn handle_export(
    State(state): State<AppState>,
    req: Option<Json<ExportRequest>>,
) -> Result<Response, AppError> {
    let req = req.map(|Json(req)| req).unwrap_or_default();
    let resume = state.session.read().await.resume.clone();

    let exported = export_to_pdf(
        &resume,
        &req.element_id,
        &req.file_name,
        state.rasterizer.as_ref(),
        &state.capture,
    )
    .await?;

    let Some(pdf) = exported else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", pdf.file_name),
            ),
        ],
        pdf.bytes,
    )
        .into_response())
}
