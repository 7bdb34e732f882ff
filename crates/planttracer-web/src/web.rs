//! WebAssembly entry point.

use crate::dom::{WebResult, element};
use crate::forms::{install_movie_table_handlers, register_func, resend_func};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

/// Call `action` when `#id` is clicked, if the page has that element.
fn on_click_if_present(id: &str, action: fn()) -> WebResult<()> {
    let Ok(button) = element(id) else {
        return Ok(());
    };
    let onclick = Closure::wrap(Box::new(move |_: web_sys::Event| action()) as Box<dyn FnMut(_)>);
    button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
    onclick.forget();
    Ok(())
}

fn wire_page() -> WebResult<()> {
    on_click_if_present("register_button", register_func)?;
    on_click_if_present("resend_button", resend_func)?;
    install_movie_table_handlers()
}

/// Initialize logging and wire whatever buttons the page has.
#[wasm_bindgen(start)]
pub fn run_wasm() {
    console_error_panic_hook::set_once();

    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("Logger already initialized: {e}").into());
    }

    log::info!("Starting PlantTracer (WASM)");

    if let Err(e) = wire_page() {
        log::error!("Could not wire page: {e}");
    }
}
