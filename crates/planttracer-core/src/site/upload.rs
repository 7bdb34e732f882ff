//! Movie upload form.

use super::{SiteError, SiteResult, escape_html};

/// What the user filled in on the upload page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadForm {
    pub title: String,
    pub description: String,
    pub file_name: String,
    pub file_size: u64,
}

/// Multipart field names for `/api/new-movie`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadFields;

impl UploadFields {
    pub const MOVIE: &'static str = "movie";
    pub const API_KEY: &'static str = "api_key";
    pub const TITLE: &'static str = "title";
    pub const DESCRIPTION: &'static str = "description";
}

impl UploadForm {
    pub const PENDING_MESSAGE: &'static str = "Uploading movie...";

    /// Reject files larger than `max_bytes`.
    pub fn validate(&self, max_bytes: u64) -> SiteResult<()> {
        if self.file_size > max_bytes {
            return Err(SiteError::FileTooLarge {
                size: self.file_size,
                max: max_bytes,
            });
        }
        Ok(())
    }
}

/// How the upload request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The server answered.
    Completed { status: u16, body: String },
    /// The abort timer fired first.
    TimedOut,
    /// The request failed before any answer (network error).
    Failed(String),
}

/// Message to show plus whether the form fields should be emptied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReport {
    pub message: String,
    pub clear_form: bool,
}

impl UploadOutcome {
    pub fn report(&self) -> UploadReport {
        match self {
            UploadOutcome::Completed { status: 200, body } => UploadReport {
                message: format!("Movie successfully uploaded: {}", escape_html(body)),
                clear_form: true,
            },
            UploadOutcome::Completed { status, .. } => UploadReport {
                message: format!("<i>Error uploading movie: {status}</i>"),
                clear_form: false,
            },
            UploadOutcome::TimedOut | UploadOutcome::Failed(_) => UploadReport {
                message: "Error uploading movie.".to_string(),
                clear_form: false,
            },
        }
    }
}
