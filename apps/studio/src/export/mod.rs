//! Export Pipeline: preview container → raster image → single-page PDF.
//!
//! Flow: look up the container in the preview → rasterize at 2x →
//! size an A4-wide page to the image → embed → hand back bytes for download.
//! An unknown container id is a silent no-op (`Ok(None)`).

pub mod handlers;
pub mod pdf;
pub mod raster;

use thiserror::Error;
use tracing::{error, info};

use crate::export::pdf::{image_to_pdf, PageSize, PdfError};
use crate::export::raster::{CaptureError, CaptureOptions, Rasterizer};
use crate::models::resume::ResumeData;
use crate::preview::render_element;

pub const DEFAULT_FILE_NAME: &str = "resume";

#[derive(Debug, Error)]
pub enum ExportFailure {
    #[error("capture failed: {0}")]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Pdf(#[from] PdfError),
}

/// Displays as the user-facing message; the cause is the error source.
#[derive(Debug, Error)]
#[error("Failed to export resume to PDF. Please try again.")]
pub struct ExportError {
    #[source]
    cause: ExportFailure,
}

/// A finished PDF ready to be offered as a download.
#[derive(Debug, Clone)]
pub struct ExportedPdf {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub page: PageSize,
}

/// `<file_name>.pdf`, with anything unsafe for a header or a path replaced.
pub fn download_name(file_name: &str) -> String {
    let cleaned: String = file_name
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | ' ') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let stem = cleaned.trim_matches(|c: char| c == '.' || c.is_whitespace());
    let stem = if stem.is_empty() { DEFAULT_FILE_NAME } else { stem };
    format!("{stem}.pdf")
}

/// Captures the preview container `element_id` and wraps it in a PDF.
pub async fn export_to_pdf(
    resume: &ResumeData,
    element_id: &str,
    file_name: &str,
    rasterizer: &dyn Rasterizer,
    options: &CaptureOptions,
) -> Result<Option<ExportedPdf>, ExportError> {
    let Some(html) = render_element(resume, element_id) else {
        info!("Export skipped: no preview container '{element_id}'");
        return Ok(None);
    };

    match build(&html, rasterizer, options).await {
        Ok((bytes, page)) => {
            let file_name = download_name(file_name);
            info!(
                "Exported '{element_id}' to {file_name} ({} bytes, {:.0}x{:.0}pt)",
                bytes.len(),
                page.width,
                page.height
            );
            Ok(Some(ExportedPdf {
                file_name,
                bytes,
                page,
            }))
        }
        Err(cause) => Err(fail(element_id, cause)),
    }
}

/// Logs the underlying cause and hides it behind the user-facing message.
fn fail(element_id: &str, cause: ExportFailure) -> ExportError {
    error!("Export of '{element_id}' failed: {cause}");
    ExportError { cause }
}

async fn build(
    html: &str,
    rasterizer: &dyn Rasterizer,
    options: &CaptureOptions,
) -> Result<(Vec<u8>, PageSize), ExportFailure> {
    let image = rasterizer.capture(html, options).await?;
    Ok(image_to_pdf(&image)?)
}
