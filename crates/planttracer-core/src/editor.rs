//! The annotation editor: one canvas, its scene and its pointer state.

use crate::config::EditorConfig;
use crate::controller::{ControllerResponse, InteractionController};
use crate::descriptor::{EditorError, ShapeDescriptor};
use crate::input::PointerEvent;
use crate::scene::{BitmapRequest, Scene};
use crate::shapes::{DrawStyle, LoadState, Shape, ShapeId};
use crate::surface::DrawSurface;

/// Owns everything one annotation canvas needs. Editors share no state, so
/// several can live on the same page.
#[derive(Debug)]
pub struct Editor<S: DrawSurface> {
    scene: Scene,
    controller: InteractionController,
    surface: S,
    config: EditorConfig,
    style: DrawStyle,
}

impl<S: DrawSurface> Editor<S> {
    /// Create an editor with an empty scene.
    pub fn new(surface: S, config: EditorConfig) -> Self {
        let style = config.draw_style();
        Self {
            scene: Scene::new(),
            controller: InteractionController::new(),
            surface,
            config,
            style,
        }
    }

    /// Replace the scene with `descriptors` and draw the first frame.
    ///
    /// Every descriptor is validated before anything changes, so a bad
    /// descriptor leaves the current scene untouched.
    pub fn initialize(&mut self, descriptors: &[ShapeDescriptor]) -> Result<(), EditorError> {
        let shapes = descriptors
            .iter()
            .enumerate()
            .map(|(index, desc)| desc.to_shape(index))
            .collect::<Result<Vec<_>, _>>()?;

        self.scene.clear();
        self.surface.release_bitmaps();
        self.controller.reset();
        for shape in shapes {
            self.scene.add(shape);
        }
        log::info!("Editor initialized with {} shapes", self.scene.len());

        self.render();
        Ok(())
    }

    /// Parse a JSON descriptor list, then [`Editor::initialize`].
    pub fn initialize_from_json(&mut self, json: &str) -> Result<(), EditorError> {
        let descriptors = ShapeDescriptor::list_from_json(json)?;
        self.initialize(&descriptors)
    }

    /// Feed a pointer event (viewport coordinates) to the controller.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> ControllerResponse {
        let response =
            self.controller
                .handle_pointer_event(event, &mut self.scene, &mut self.surface, &self.style);
        if response.selection_changed {
            log::debug!("Selection is now {:?}", self.controller.selection());
        }
        response
    }

    /// Redraw the whole scene.
    pub fn render(&mut self) {
        let selection = self.controller.selection();
        self.scene.render(&mut self.surface, selection, &self.style);
    }

    /// Bitmaps the host should start loading.
    pub fn take_bitmap_requests(&mut self) -> Vec<BitmapRequest> {
        self.scene.take_bitmap_requests()
    }

    /// Whether image `id` is in the current scene and still waiting for its
    /// bitmap. Loads that finish after the scene was replaced are stale.
    pub fn is_awaiting_bitmap(&self, id: ShapeId) -> bool {
        self.scene
            .get(id)
            .and_then(Shape::as_image)
            .is_some_and(|image| image.load_state() == LoadState::Pending)
    }

    /// The host finished loading the bitmap for image `id`.
    ///
    /// Redraws the scene the first time an image becomes ready and returns
    /// whether it did.
    pub fn bitmap_ready(&mut self, id: ShapeId) -> bool {
        if !self.scene.mark_bitmap_loaded(id) {
            return false;
        }
        log::debug!("Bitmap ready for {id}");
        self.render();
        true
    }

    /// The host gave up loading the bitmap for image `id`. The image stays
    /// undrawn.
    pub fn bitmap_failed(&mut self, id: ShapeId) {
        if let Some(shape) = self.scene.get(id) {
            log::warn!("Could not load image {}", shape.name());
        }
        self.scene.mark_bitmap_failed(id);
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn selection(&self) -> Option<ShapeId> {
        self.controller.selection()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::default_markers;
    use crate::surface::{Cursor, DrawCommand, RecordingSurface};
    use kurbo::{Point, Size};

    fn editor() -> Editor<RecordingSurface> {
        Editor::new(RecordingSurface::new(Size::new(640.0, 480.0)), EditorConfig::default())
    }

    fn ids(editor: &Editor<RecordingSurface>) -> Vec<ShapeId> {
        editor.scene().iter().map(Shape::id).collect()
    }

    #[test]
    fn test_initialize_renders_first_frame() {
        let mut editor = editor();
        editor.initialize(&default_markers(None)).unwrap();
        assert_eq!(editor.scene().len(), 2);
        assert_eq!(editor.surface().frame_count(), 1);
        assert_eq!(
            editor.surface().filled_centers(),
            vec![Point::new(50.0, 50.0), Point::new(10.0, 50.0)]
        );
    }

    #[test]
    fn test_initialize_twice_does_not_duplicate() {
        let mut editor = editor();
        editor.initialize(&default_markers(None)).unwrap();
        editor.initialize(&default_markers(None)).unwrap();
        assert_eq!(editor.scene().len(), 2);
    }

    #[test]
    fn test_initialize_resets_selection() {
        let mut editor = editor();
        editor.initialize(&default_markers(None)).unwrap();
        editor.handle_pointer_event(PointerEvent::down(50.0, 50.0));
        assert!(editor.selection().is_some());

        editor.initialize(&default_markers(None)).unwrap();
        assert_eq!(editor.selection(), None);
    }

    #[test]
    fn test_invalid_descriptor_keeps_scene() {
        let mut editor = editor();
        editor.initialize(&default_markers(None)).unwrap();
        let before = ids(&editor);

        let bad = vec![
            ShapeDescriptor::circle(1.0, 1.0, 1.0, "red", "white", "ok"),
            ShapeDescriptor::circle(1.0, 1.0, -1.0, "red", "white", "bad"),
        ];
        assert!(matches!(
            editor.initialize(&bad),
            Err(EditorError::InvalidRadius { index: 1, .. })
        ));
        assert_eq!(ids(&editor), before);
    }

    #[test]
    fn test_initialize_from_json() {
        let mut editor = editor();
        editor
            .initialize_from_json(r##"[{"type":"circle","x":5,"y":5,"r":2,"fill":"#00ff00","stroke":"black"}]"##)
            .unwrap();
        assert_eq!(editor.scene().len(), 1);
        assert!(editor.initialize_from_json("not json").is_err());
    }

    #[test]
    fn test_drag_scenario() {
        let mut editor = editor();
        editor.initialize(&default_markers(None)).unwrap();
        let red = ids(&editor)[0];

        editor.handle_pointer_event(PointerEvent::down(50.0, 50.0));
        assert_eq!(editor.selection(), Some(red));
        assert_eq!(editor.surface().cursor(), Cursor::Crosshair);

        editor.handle_pointer_event(PointerEvent::moved(100.0, 100.0));
        editor.handle_pointer_event(PointerEvent::up(100.0, 100.0));

        assert_eq!(editor.selection(), None);
        assert_eq!(editor.surface().cursor(), Cursor::Auto);
        assert_eq!(
            editor.scene().get(red).map(Shape::position),
            Some(Point::new(100.0, 100.0))
        );
    }

    #[test]
    fn test_pointer_down_on_nothing() {
        let mut editor = editor();
        editor.initialize(&default_markers(None)).unwrap();
        let response = editor.handle_pointer_event(PointerEvent::down(0.0, 0.0));
        assert_eq!(editor.selection(), None);
        assert!(!response.selection_changed);
    }

    #[test]
    fn test_bitmap_ready_redraws_once() {
        let mut editor = editor();
        editor.initialize(&default_markers(Some("/frame.jpg"))).unwrap();

        let requests = editor.take_bitmap_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].source, "/frame.jpg");
        let frame = requests[0].shape;

        let frames_before = editor.surface().frame_count();
        assert!(editor.bitmap_ready(frame));
        assert!(!editor.bitmap_ready(frame));
        assert_eq!(editor.surface().frame_count(), frames_before + 1);

        let commands = editor.surface_mut().take_commands();
        let last_frame = &commands[commands.len() - 6..];
        assert!(matches!(last_frame[0], DrawCommand::ClearRect { .. }));
        assert!(matches!(last_frame[1], DrawCommand::DrawBitmap { .. }));
        assert!(editor.take_bitmap_requests().is_empty());
    }

    #[test]
    fn test_bitmap_failed_stays_undrawn() {
        let mut editor = editor();
        editor.initialize(&default_markers(Some("/missing.jpg"))).unwrap();
        let frame = editor.take_bitmap_requests()[0].shape;

        editor.bitmap_failed(frame);
        assert!(!editor.bitmap_ready(frame));
        editor.render();

        let state = editor.scene().get(frame).and_then(Shape::as_image).map(|i| i.load_state());
        assert_eq!(state, Some(LoadState::Failed));
        assert!(!editor
            .surface()
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::DrawBitmap { .. })));
    }

    #[test]
    fn test_reinitialize_releases_bitmaps() {
        let mut editor = editor();
        editor.initialize(&default_markers(Some("/frame.jpg"))).unwrap();
        editor.initialize(&default_markers(Some("/frame.jpg"))).unwrap();
        editor.initialize(&default_markers(Some("/frame.jpg"))).unwrap();
        assert_eq!(editor.surface().bitmap_releases(), 3);
    }

    #[test]
    fn test_stale_bitmap_is_not_awaited() {
        let mut editor = editor();
        editor.initialize(&default_markers(Some("/frame.jpg"))).unwrap();
        let old_frame = editor.take_bitmap_requests()[0].shape;
        assert!(editor.is_awaiting_bitmap(old_frame));

        editor.initialize(&default_markers(Some("/frame.jpg"))).unwrap();
        let new_frame = editor.take_bitmap_requests()[0].shape;
        assert_ne!(old_frame, new_frame);
        assert!(!editor.is_awaiting_bitmap(old_frame));
        assert!(!editor.bitmap_ready(old_frame));
        assert!(editor.is_awaiting_bitmap(new_frame));

        assert!(editor.bitmap_ready(new_frame));
        assert!(!editor.is_awaiting_bitmap(new_frame));
    }

    #[test]
    fn test_circles_never_await_bitmaps() {
        let mut editor = editor();
        editor.initialize(&default_markers(None)).unwrap();
        let red = ids(&editor)[0];
        assert!(!editor.is_awaiting_bitmap(red));
    }

    #[test]
    fn test_editors_are_independent() {
        let mut a = editor();
        let mut b = editor();
        a.initialize(&default_markers(None)).unwrap();
        b.initialize(&default_markers(None)).unwrap();

        a.handle_pointer_event(PointerEvent::down(50.0, 50.0));
        assert!(a.selection().is_some());
        assert_eq!(b.selection(), None);
    }
}
