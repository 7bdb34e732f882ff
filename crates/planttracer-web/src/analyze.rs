//! The movie analysis page: one editor bound to the `#c1` canvas.

use crate::canvas::CanvasSurface;
use crate::dom::{WebError, WebResult, document, set_html};
use crate::registry::Registry;
use planttracer_core::site::frame_url;
use planttracer_core::{Editor, EditorConfig, PointerEvent, ShapeDescriptor, ShapeId, default_markers};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, HtmlImageElement, MouseEvent};

type SharedEditor = Rc<RefCell<Editor<CanvasSurface>>>;
type MouseListener = Closure<dyn FnMut(MouseEvent)>;

thread_local! {
    static SESSIONS: RefCell<Registry<Session>> = RefCell::new(Registry::new());
}

/// Editor plus the canvas listeners feeding it. Dropping it detaches the
/// listeners.
struct Session {
    editor: SharedEditor,
    canvas: HtmlCanvasElement,
    listeners: Vec<(&'static str, MouseListener)>,
}

impl Session {
    fn listen(&mut self, kind: &'static str, to_event: fn(&MouseEvent) -> PointerEvent) -> WebResult<()> {
        let editor = self.editor.clone();
        let listener = Closure::wrap(Box::new(move |event: MouseEvent| {
            let response = match editor.try_borrow_mut() {
                Ok(mut editor) => editor.handle_pointer_event(to_event(&event)),
                Err(_) => {
                    log::warn!("Editor busy, dropping {kind}");
                    return;
                }
            };
            if response.redrawn {
                load_bitmaps(&editor);
            }
        }) as Box<dyn FnMut(MouseEvent)>);
        self.canvas
            .add_event_listener_with_callback(kind, listener.as_ref().unchecked_ref())?;
        self.listeners.push((kind, listener));
        Ok(())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        for (kind, listener) in self.listeners.drain(..) {
            let _ = self
                .canvas
                .remove_event_listener_with_callback(kind, listener.as_ref().unchecked_ref());
        }
    }
}

/// Handle to a live editor wired to its canvas.
///
/// The page registry keeps the session running even when JavaScript drops
/// this handle. Starting another session on the same canvas replaces it;
/// `detach()` stops it explicitly.
#[wasm_bindgen]
#[derive(Clone)]
pub struct AnnotationSession {
    canvas_id: String,
    inner: Rc<Session>,
}

impl AnnotationSession {
    /// Bind an editor to the configured canvas, load `shapes` and register
    /// the session for that canvas.
    pub fn start(config: EditorConfig, shapes: &[ShapeDescriptor]) -> WebResult<Self> {
        let canvas_id = config.canvas_id.clone();
        let surface = CanvasSurface::from_id(&canvas_id)?;
        let canvas = surface.canvas().clone();
        let editor = Rc::new(RefCell::new(Editor::new(surface, config)));

        editor.borrow_mut().initialize(shapes)?;
        load_bitmaps(&editor);

        let mut session = Session {
            editor,
            canvas,
            listeners: Vec::new(),
        };
        session.listen("mousedown", |e| PointerEvent::down(e.client_x() as f64, e.client_y() as f64))?;
        session.listen("mousemove", |e| PointerEvent::moved(e.client_x() as f64, e.client_y() as f64))?;
        session.listen("mouseup", |e| PointerEvent::up(e.client_x() as f64, e.client_y() as f64))?;

        let inner = Rc::new(session);
        let replaced = SESSIONS.with(|sessions| sessions.borrow_mut().register(canvas_id.clone(), inner.clone()));
        if replaced.is_some() {
            log::info!("Replaced previous session on #{canvas_id}");
        }
        Ok(Self { canvas_id, inner })
    }

    fn editor(&self) -> &SharedEditor {
        &self.inner.editor
    }
}

#[wasm_bindgen]
impl AnnotationSession {
    /// Replace the shapes with a JSON descriptor list.
    #[wasm_bindgen(js_name = setShapes)]
    pub fn set_shapes(&self, json: &str) -> Result<(), JsValue> {
        self.editor()
            .borrow_mut()
            .initialize_from_json(json)
            .map_err(WebError::from)?;
        load_bitmaps(self.editor());
        Ok(())
    }

    /// Current shapes as JSON.
    #[wasm_bindgen(js_name = shapesJson)]
    pub fn shapes_json(&self) -> Result<String, JsValue> {
        let editor = self.editor().borrow();
        let shapes: Vec<_> = editor.scene().iter().collect();
        serde_json::to_string(&shapes).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Id of the shape being dragged, if any.
    pub fn selection(&self) -> Option<String> {
        self.editor().borrow().selection().map(|id| id.to_string())
    }

    pub fn redraw(&self) {
        self.editor().borrow_mut().render();
        load_bitmaps(self.editor());
    }

    /// Unregister the session. Its listeners go away once the last handle
    /// is freed.
    pub fn detach(&self) {
        let released = SESSIONS.with(|sessions| sessions.borrow_mut().release(&self.canvas_id, &self.inner));
        if released {
            log::info!("Detached session on #{}", self.canvas_id);
        }
    }
}

/// Start loading every bitmap the editor asked for.
fn load_bitmaps(editor: &SharedEditor) {
    let requests = editor.borrow_mut().take_bitmap_requests();
    for request in requests {
        if let Err(e) = load_bitmap(editor, request.shape, &request.source) {
            log::warn!("Could not start loading {}: {e}", request.source);
            editor.borrow_mut().bitmap_failed(request.shape);
        }
    }
}

fn load_bitmap(editor: &SharedEditor, shape: ShapeId, source: &str) -> WebResult<()> {
    let img: HtmlImageElement = document()?
        .create_element("img")?
        .dyn_into()
        .map_err(|_| WebError::Js("img element is not an HtmlImageElement".to_string()))?;

    let loaded = img.clone();
    let on_load_editor = editor.clone();
    let onload = Closure::once(Box::new(move |_: web_sys::Event| {
        let mut editor = on_load_editor.borrow_mut();
        if !editor.is_awaiting_bitmap(shape) {
            log::debug!("Dropping stale bitmap for {shape}");
            return;
        }
        editor.surface_mut().insert_bitmap(shape, loaded);
        editor.bitmap_ready(shape);
    }) as Box<dyn FnOnce(_)>);

    let on_error_editor = editor.clone();
    let onerror = Closure::once(Box::new(move |_: web_sys::Event| {
        on_error_editor.borrow_mut().bitmap_failed(shape);
    }) as Box<dyn FnOnce(_)>);

    img.set_onload(Some(onload.as_ref().unchecked_ref()));
    img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    onload.forget();
    onerror.forget();

    log::debug!("Loading bitmap {source}");
    img.set_src(source);
    Ok(())
}

/// Set up the analysis page for `movie_id`: heading, first frame and the
/// two marker balls. The returned handle may be ignored.
#[wasm_bindgen]
pub fn analyze_movie(movie_id: i32, api_key: &str) -> Result<AnnotationSession, JsValue> {
    set_html("firsth2", &format!("Movie {movie_id}"));

    let config = EditorConfig::default();
    let url = frame_url(i64::from(movie_id), api_key, 0, 0);
    let frame = config.show_frame.then_some(url.as_str());
    let shapes = default_markers(frame);

    log::info!("Analyzing movie {movie_id}");
    Ok(AnnotationSession::start(config, &shapes)?)
}
