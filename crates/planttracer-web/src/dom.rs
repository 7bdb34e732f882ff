//! DOM lookup helpers and the web error type.

use planttracer_core::EditorError;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlInputElement, HtmlTextAreaElement, Window};

/// Errors from browser APIs.
#[derive(Debug, Error)]
pub enum WebError {
    #[error("No browser window")]
    NoWindow,
    #[error("No document")]
    NoDocument,
    #[error("Element #{0} not found")]
    MissingElement(String),
    #[error("Element #{id} is not a {expected}")]
    WrongElement { id: String, expected: &'static str },
    #[error("JavaScript error: {0}")]
    Js(String),
    #[error(transparent)]
    Editor(#[from] EditorError),
}

impl From<JsValue> for WebError {
    fn from(value: JsValue) -> Self {
        WebError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<WebError> for JsValue {
    fn from(err: WebError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub type WebResult<T> = Result<T, WebError>;

pub fn window() -> WebResult<Window> {
    web_sys::window().ok_or(WebError::NoWindow)
}

pub fn document() -> WebResult<Document> {
    window()?.document().ok_or(WebError::NoDocument)
}

pub fn element(id: &str) -> WebResult<Element> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| WebError::MissingElement(id.to_string()))
}

/// Look up `#id` and cast it to `T`.
pub fn element_as<T: JsCast>(id: &str, expected: &'static str) -> WebResult<T> {
    element(id)?.dyn_into::<T>().map_err(|_| WebError::WrongElement {
        id: id.to_string(),
        expected,
    })
}

/// Current value of an `<input>` or `<textarea>`, or empty when it is
/// missing.
pub fn input_value(id: &str) -> String {
    let Ok(el) = element(id) else {
        return String::new();
    };
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

pub fn set_input_value(id: &str, value: &str) {
    let Ok(el) = element(id) else {
        return;
    };
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.set_value(value);
    } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        area.set_value(value);
    }
}

/// Replace the inner HTML of `#id`, logging when the element is absent.
pub fn set_html(id: &str, html: &str) {
    match element(id) {
        Ok(el) => el.set_inner_html(html),
        Err(e) => log::warn!("{e}"),
    }
}
