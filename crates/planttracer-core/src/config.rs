//! Editor and site configuration.

use crate::shapes::DrawStyle;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default upload ceiling (16 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024;

/// Default abort timeout for movie uploads.
pub const DEFAULT_UPLOAD_TIMEOUT_MS: u64 = 5000;

/// Settings for one annotation editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// DOM id of the canvas element.
    pub canvas_id: String,
    /// Circle outline width.
    pub stroke_width: f64,
    /// Opacity of the grabbed marker.
    pub selected_opacity: f64,
    /// Put the movie's first frame behind the markers.
    pub show_frame: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_id: "c1".to_string(),
            stroke_width: 3.0,
            selected_opacity: 0.5,
            show_frame: true,
        }
    }
}

impl EditorConfig {
    pub fn draw_style(&self) -> DrawStyle {
        DrawStyle {
            stroke_width: self.stroke_width,
            selected_opacity: self.selected_opacity,
        }
    }
}

/// Settings for the registration, upload and listing pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// DOM id of the status message region.
    pub message_id: String,
    /// Largest movie file accepted for upload, in bytes.
    pub max_upload_bytes: u64,
    /// Abort the upload request after this many milliseconds.
    pub upload_timeout_ms: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            message_id: "message".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            upload_timeout_ms: DEFAULT_UPLOAD_TIMEOUT_MS,
        }
    }
}

impl SiteConfig {
    pub fn upload_timeout(&self) -> Duration {
        Duration::from_millis(self.upload_timeout_ms)
    }
}
