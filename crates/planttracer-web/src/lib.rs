//! PlantTracer browser bindings.
//!
//! On `wasm32` this crate drives the annotation canvas and the site's forms
//! through `web-sys`. The platform-independent [`replay`] module runs the
//! same editor headlessly and backs the native `planttracer` binary;
//! [`registry`] holds the page's live sessions.

pub mod registry;
pub mod replay;

#[cfg(target_arch = "wasm32")]
mod analyze;
#[cfg(target_arch = "wasm32")]
mod canvas;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod forms;
#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use analyze::{AnnotationSession, analyze_movie};
#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
#[cfg(target_arch = "wasm32")]
pub use dom::{WebError, WebResult};
#[cfg(target_arch = "wasm32")]
pub use forms::{list_movies, register_func, resend_func, upload_movie};
#[cfg(target_arch = "wasm32")]
pub use web::run_wasm;
