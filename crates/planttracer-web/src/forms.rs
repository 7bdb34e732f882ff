//! Registration, upload and movie list pages.

use crate::dom::{WebError, WebResult, document, element, element_as, input_value, set_html, set_input_value, window};
use planttracer_core::SiteConfig;
use planttracer_core::site::{
    ApiRoute, ApiStatus, ListMoviesResponse, MovieTables, RegistrationForm, ResendForm, SiteError, UploadFields,
    UploadForm, UploadOutcome, error_message, escape_html, form_body, post_error_message,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    AbortController, AbortSignal, Element, Event, FormData, Headers, HtmlElement, HtmlInputElement, KeyboardEvent,
    RequestInit, Response,
};

/// A completed HTTP exchange.
struct Reply {
    status: u16,
    body: String,
}

/// POST `body` to `route`.
async fn post(route: ApiRoute, body: &JsValue, content_type: Option<&str>, signal: Option<&AbortSignal>) -> WebResult<Reply> {
    let init = RequestInit::new();
    init.set_method("POST");
    init.set_body(body);
    if let Some(content_type) = content_type {
        let headers = Headers::new()?;
        headers.set("Content-Type", content_type)?;
        init.set_headers(&headers);
    }
    if let Some(signal) = signal {
        init.set_signal(Some(signal));
    }

    let promise = window()?.fetch_with_str_and_init(route.path(), &init);
    let response: Response = JsFuture::from(promise)
        .await?
        .dyn_into()
        .map_err(|_| WebError::Js("fetch did not return a Response".to_string()))?;
    let body = JsFuture::from(response.text()?).await?.as_string().unwrap_or_default();
    Ok(Reply {
        status: response.status(),
        body,
    })
}

async fn post_form(route: ApiRoute, fields: &[(&str, &str)]) -> WebResult<Reply> {
    let body = JsValue::from_str(&form_body(fields.iter().copied()));
    post(route, &body, Some("application/x-www-form-urlencoded"), None).await
}

fn show_message(html: &str) {
    set_html(&SiteConfig::default().message_id, html);
}

fn show_error(err: &SiteError) {
    show_message(&error_message(err));
}

/// Register the `#email` address for the `#course_key` course.
#[wasm_bindgen]
pub fn register_func() {
    let form = RegistrationForm::new(input_value("email"), input_value("course_key"));
    if let Err(e) = form.validate() {
        show_error(&e);
        return;
    }
    show_message(&form.pending_message());

    wasm_bindgen_futures::spawn_local(async move {
        match post_form(ApiRoute::Register, &form.fields()).await {
            Ok(reply) => {
                log::info!("Register returned {}", reply.status);
                let message = ApiStatus::from_json(&reply.body).and_then(ApiStatus::into_result);
                match message {
                    Ok(Some(message)) => show_message(&escape_html(&message)),
                    Ok(None) => {}
                    Err(e) => show_error(&e),
                }
            }
            Err(e) => {
                log::error!("Register failed: {e}");
                show_message(&post_error_message(&e.to_string()));
            }
        }
    });
}

/// Ask the server to mail a new login link to `#email`.
#[wasm_bindgen]
pub fn resend_func() {
    let form = ResendForm::new(input_value("email"));
    if let Err(e) = form.validate() {
        show_error(&e);
        return;
    }
    show_message(&form.pending_message());

    wasm_bindgen_futures::spawn_local(async move {
        match post_form(ApiRoute::ResendLink, &form.fields()).await {
            Ok(reply) => show_message(&ResendForm::response_message(reply.status, &reply.body)),
            Err(e) => {
                log::error!("Resend failed: {e}");
                show_message(&post_error_message(&e.to_string()));
            }
        }
    });
}

/// Upload the file chosen in `#movie-file` with its title and description.
#[wasm_bindgen]
pub fn upload_movie(api_key: String) {
    let config = SiteConfig::default();
    let file = element_as::<HtmlInputElement>("movie-file", "input")
        .ok()
        .and_then(|input| input.files())
        .and_then(|files| files.get(0));
    let Some(file) = file else {
        show_error(&SiteError::MissingField("a movie file"));
        return;
    };

    let form = UploadForm {
        title: input_value("movie-title"),
        description: input_value("movie-description"),
        file_name: file.name(),
        file_size: file.size() as u64,
    };
    show_message(UploadForm::PENDING_MESSAGE);
    if let Err(e) = form.validate(config.max_upload_bytes) {
        show_message(&escape_html(&e.to_string()));
        return;
    }

    wasm_bindgen_futures::spawn_local(async move {
        let outcome = match send_upload(&api_key, &form, &file, &config).await {
            Ok(outcome) => outcome,
            Err(e) => UploadOutcome::Failed(e.to_string()),
        };
        log::info!("Upload of {} finished: {outcome:?}", form.file_name);

        let report = outcome.report();
        show_message(&report.message);
        if report.clear_form {
            set_input_value("movie-title", "");
            set_input_value("movie-description", "");
            set_input_value("movie-file", "");
        }
    });
}

async fn send_upload(api_key: &str, form: &UploadForm, file: &web_sys::File, config: &SiteConfig) -> WebResult<UploadOutcome> {
    let data = FormData::new()?;
    data.append_with_blob(UploadFields::MOVIE, file)?;
    data.append_with_str(UploadFields::API_KEY, api_key)?;
    data.append_with_str(UploadFields::TITLE, &form.title)?;
    data.append_with_str(UploadFields::DESCRIPTION, &form.description)?;

    let controller = AbortController::new()?;
    let signal = controller.signal();
    let abort = Closure::once_into_js(move || controller.abort());
    let timeout_ms = i32::try_from(config.upload_timeout().as_millis()).unwrap_or(i32::MAX);
    let timer = window()?.set_timeout_with_callback_and_timeout_and_arguments_0(abort.unchecked_ref(), timeout_ms)?;

    let result = post(ApiRoute::NewMovie, &data, None, Some(&signal)).await;
    window()?.clear_timeout_with_handle(timer);

    Ok(match result {
        Ok(reply) => UploadOutcome::Completed {
            status: reply.status,
            body: reply.body,
        },
        Err(_) if signal.aborted() => UploadOutcome::TimedOut,
        Err(e) => UploadOutcome::Failed(e.to_string()),
    })
}

/// Fetch the movie list and fill the four movie tables.
#[wasm_bindgen]
pub fn list_movies(api_key: String, user_id: i32, primary_course_id: Option<i32>) {
    show_message("Listing movies...");

    wasm_bindgen_futures::spawn_local(async move {
        let reply = match fetch_movie_list(&api_key).await {
            Ok(reply) => reply,
            Err(e) => {
                log::error!("list-movies failed: {e}");
                show_message(&post_error_message(&e.to_string()));
                return;
            }
        };
        match ListMoviesResponse::parse(&reply.body) {
            Ok(movies) => {
                log::debug!("Listed {} movies", movies.len());
                let tables = MovieTables::partition(&movies, i64::from(user_id), primary_course_id.map(i64::from));
                for (div, html) in tables.render() {
                    set_html(div, &html);
                }
                show_message("");
            }
            Err(e) => show_message(&escape_html(&e.to_string())),
        }
    });
}

async fn fetch_movie_list(api_key: &str) -> WebResult<Reply> {
    let data = FormData::new()?;
    data.append_with_str(UploadFields::API_KEY, api_key)?;
    post(ApiRoute::ListMovies, &data, None, None).await
}

/// Install the delegated listeners for pencil editors and flag checkboxes
/// in the movie tables.
pub fn install_movie_table_handlers() -> WebResult<()> {
    let document = document()?;

    let onclick = Closure::wrap(Box::new(move |event: Event| {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        if let Ok(Some(pencil)) = target.closest(".editor") {
            if let Err(e) = begin_edit(&pencil) {
                log::warn!("Cannot edit: {e}");
            }
        } else if let Some(checkbox) = target
            .dyn_ref::<HtmlInputElement>()
            .filter(|c| c.matches(".movie-flag").unwrap_or(false))
        {
            log::info!(
                "movie {} {} -> {}",
                checkbox.get_attribute("x-movie_id").unwrap_or_default(),
                checkbox.get_attribute("x-property").unwrap_or_default(),
                checkbox.checked()
            );
        }
    }) as Box<dyn FnMut(Event)>);
    document.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
    onclick.forget();

    let onkeydown = Closure::wrap(Box::new(move |event: KeyboardEvent| {
        let Some(span) = editing_span(&event) else {
            return;
        };
        match event.key().as_str() {
            "Escape" => {
                span.set_text_content(span.get_attribute("x-original-value").as_deref());
                let _ = span.blur();
            }
            "Enter" | "Tab" => {
                event.prevent_default();
                let _ = span.blur();
            }
            _ => {}
        }
    }) as Box<dyn FnMut(KeyboardEvent)>);
    document.add_event_listener_with_callback("keydown", onkeydown.as_ref().unchecked_ref())?;
    onkeydown.forget();

    let onfocusout = Closure::wrap(Box::new(move |event: Event| {
        let Some(span) = editing_span(&event) else {
            return;
        };
        let _ = span.remove_attribute("contenteditable");
        log::info!("{} edited: {:?}", span.id(), span.text_content().unwrap_or_default().trim());
    }) as Box<dyn FnMut(Event)>);
    document.add_event_listener_with_callback("focusout", onfocusout.as_ref().unchecked_ref())?;
    onfocusout.forget();

    Ok(())
}

/// Make the span named by the pencil's `x-target` editable.
fn begin_edit(pencil: &Element) -> WebResult<()> {
    let target = pencil
        .get_attribute("x-target")
        .ok_or_else(|| WebError::Js("pencil has no x-target".to_string()))?;
    let span: HtmlElement = element(&target)?
        .dyn_into()
        .map_err(|_| WebError::WrongElement {
            id: target.clone(),
            expected: "HTML element",
        })?;
    span.set_attribute("contenteditable", "true")?;
    span.set_attribute("x-original-value", &span.text_content().unwrap_or_default())?;
    span.focus()?;
    Ok(())
}

/// The event target when it is a span currently being edited.
fn editing_span(event: &Event) -> Option<HtmlElement> {
    event
        .target()?
        .dyn_into::<HtmlElement>()
        .ok()
        .filter(|el| el.get_attribute("contenteditable").as_deref() == Some("true"))
}
