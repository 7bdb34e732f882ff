//! Page logic for registration, movie upload and the movie list.
//!
//! Everything here is plain data in, plain data out: form validation,
//! request field lists, response decoding and the HTML fragments written
//! into the page. The web crate performs the actual DOM and `fetch` work.

mod movies;
mod register;
mod upload;

pub use movies::{ListMoviesResponse, Movie, MovieTables, render_table};
pub use register::{RegistrationForm, ResendForm};
pub use upload::{UploadFields, UploadForm, UploadOutcome, UploadReport};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::form_urlencoded;

/// Site errors. The `Display` text is what ends up in the message region.
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("Please provide {0}")]
    MissingField(&'static str),
    #[error("That file is too big to upload. Please chose a file smaller than {max} bytes.")]
    FileTooLarge { size: u64, max: u64 },
    #[error("error: {message}")]
    Api { message: String },
    #[error("Invalid server response: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for site operations.
pub type SiteResult<T> = Result<T, SiteError>;

/// Server endpoints used by the pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiRoute {
    GetFrame,
    NewMovie,
    ListMovies,
    Register,
    ResendLink,
}

impl ApiRoute {
    pub fn path(self) -> &'static str {
        match self {
            ApiRoute::GetFrame => "/api/get-frame",
            ApiRoute::NewMovie => "/api/new-movie",
            ApiRoute::ListMovies => "/api/list-movies",
            ApiRoute::Register => "/api/register",
            ApiRoute::ResendLink => "/api/resend-link",
        }
    }
}

/// URL of one frame of a movie, as served by `/api/get-frame`.
pub fn frame_url(movie_id: i64, api_key: &str, frame_msec: i64, msec_delta: i64) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("movie_id", &movie_id.to_string())
        .append_pair("api_key", api_key)
        .append_pair("frame_msec", &frame_msec.to_string())
        .append_pair("msec_delta", &msec_delta.to_string())
        .finish();
    format!("{}?{}", ApiRoute::GetFrame.path(), query)
}

/// Encode form fields as an `application/x-www-form-urlencoded` body.
pub fn form_body<'a>(fields: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (name, value) in fields {
        serializer.append_pair(name, value);
    }
    serializer.finish()
}

/// The `{error, message}` envelope every API response carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiStatus {
    pub error: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiStatus {
    pub fn from_json(json: &str) -> SiteResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// `Err` when the server flagged an error.
    pub fn into_result(self) -> SiteResult<Option<String>> {
        if self.error {
            Err(SiteError::Api {
                message: self.message.unwrap_or_default(),
            })
        } else {
            Ok(self.message)
        }
    }
}

/// Escape text for insertion into HTML.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Bold error text for the message region.
pub fn error_message(err: &SiteError) -> String {
    format!("<b>{}</b>", escape_html(&err.to_string()))
}

/// Message-region text for a request that failed or was refused. `detail`
/// is a network error or the raw response body.
pub fn post_error_message(detail: &str) -> String {
    format!("POST error: {}", escape_html(detail))
}
