//! Raster capture of preview containers.
//!
//! `ChromeRasterizer` shells out to a headless Chromium to screenshot a
//! standalone HTML page, the way a browser screenshot library would capture
//! a DOM node. Tests substitute their own `Rasterizer`.

use std::path::Path;

use async_trait::async_trait;
use image::{DynamicImage, GenericImageView};
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::preview::PAGE_WIDTH_PX;

/// Device pixel ratio used for captures; 2x keeps text sharp once embedded.
pub const CAPTURE_SCALE: f32 = 2.0;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("I/O error during capture: {0}")]
    Io(#[from] std::io::Error),

    #[error("capture tool failed: {0}")]
    Tool(String),

    #[error("could not decode captured image: {0}")]
    Image(#[from] image::ImageError),
}

#[derive(Debug, Clone)]
pub struct CaptureOptions {
    pub scale: f32,
    /// Let the page pull in remote images and fonts.
    pub allow_cross_origin: bool,
    pub viewport_width: u32,
    /// Upper bound on content height in CSS pixels; the blank remainder is trimmed.
    pub viewport_height: u32,
}

impl CaptureOptions {
    pub fn new(viewport_height: u32) -> Self {
        Self {
            scale: CAPTURE_SCALE,
            allow_cross_origin: true,
            viewport_width: PAGE_WIDTH_PX,
            viewport_height,
        }
    }
}

#[async_trait]
pub trait Rasterizer: Send + Sync {
    /// Renders a standalone HTML page and returns its pixels.
    async fn capture(&self, html: &str, options: &CaptureOptions) -> Result<DynamicImage, CaptureError>;
}

#[derive(Debug, Clone)]
pub struct ChromeRasterizer {
    chrome_bin: String,
}

impl ChromeRasterizer {
    pub fn new(chrome_bin: String) -> Self {
        Self { chrome_bin }
    }

    fn args(&self, html_path: &Path, shot_path: &Path, options: &CaptureOptions) -> Vec<String> {
        let mut args = vec![
            "--headless=new".to_string(),
            "--disable-gpu".to_string(),
            "--no-sandbox".to_string(),
            "--hide-scrollbars".to_string(),
            "--default-background-color=ffffffff".to_string(),
            "--virtual-time-budget=5000".to_string(),
            format!("--force-device-scale-factor={}", options.scale),
            format!(
                "--window-size={},{}",
                options.viewport_width, options.viewport_height
            ),
            format!("--screenshot={}", shot_path.display()),
        ];
        if options.allow_cross_origin {
            args.push("--allow-file-access-from-files".to_string());
            args.push("--allow-running-insecure-content".to_string());
        }
        args.push(format!("file://{}", html_path.display()));
        args
    }
}

#[async_trait]
impl Rasterizer for ChromeRasterizer {
    async fn capture(&self, html: &str, options: &CaptureOptions) -> Result<DynamicImage, CaptureError> {
        let workdir = tempfile::tempdir()?;
        let html_path = workdir.path().join("capture.html");
        let shot_path = workdir.path().join("capture.png");
        tokio::fs::write(&html_path, html).await?;

        let output = Command::new(&self.chrome_bin)
            .args(self.args(&html_path, &shot_path, options))
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                CaptureError::Tool(format!(
                    "failed to invoke '{}' ({e}); is Chromium installed?",
                    self.chrome_bin
                ))
            })?;

        if !output.status.success() {
            return Err(CaptureError::Tool(format!(
                "{} exited with {}: {}",
                self.chrome_bin,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        if !shot_path.exists() {
            return Err(CaptureError::Tool(format!(
                "expected screenshot not found: {}",
                shot_path.display()
            )));
        }

        let bytes = tokio::fs::read(&shot_path).await?;
        let image = image::load_from_memory(&bytes)?;
        debug!(
            "Captured {}x{} px at scale {}",
            image.width(),
            image.height(),
            options.scale
        );
        let (trimmed, clipped) = trim_to_content(image);
        if clipped {
            warn!(
                "Preview content reaches the bottom of the {}px capture window and may be cut off; \
                 raise CAPTURE_VIEWPORT_HEIGHT",
                options.viewport_height
            );
        }
        Ok(trimmed)
    }
}

/// Trims the blank tail and reports whether content ran to the bottom edge,
/// which means the capture window was too short for it.
pub fn trim_to_content(image: DynamicImage) -> (DynamicImage, bool) {
    let captured_height = image.height();
    let trimmed = trim_trailing_background(image);
    let clipped = captured_height > 1 && trimmed.height() == captured_height;
    (trimmed, clipped)
}

/// Crops rows at the bottom that match the bottom-left pixel, so the image
/// height follows the content rather than the viewport.
pub fn trim_trailing_background(image: DynamicImage) -> DynamicImage {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return image;
    }
    let rgba = image.to_rgba8();
    let background = *rgba.get_pixel(0, height - 1);
    let last_content_row = (0..height)
        .rev()
        .find(|&y| (0..width).any(|x| *rgba.get_pixel(x, y) != background));

    match last_content_row {
        Some(row) if row + 1 < height => image.crop_imm(0, 0, width, row + 1),
        Some(_) => image,
        None => image.crop_imm(0, 0, width, 1),
    }
}
