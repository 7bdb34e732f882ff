//! Image shape for the movie frame behind the markers.

use super::{DrawStyle, ShapeId, ShapeTrait};
use crate::surface::DrawSurface;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where an image's bitmap is in its loading lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Nobody asked for the bitmap yet.
    #[default]
    Unrequested,
    /// The host is fetching the bitmap.
    Pending,
    /// The host holds the decoded bitmap and can blit it.
    Loaded,
    /// The bitmap could not be loaded; the image stays undrawn.
    Failed,
}

/// A raster image drawn at a fixed origin. Images are never draggable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub(crate) id: ShapeId,
    /// Top-left corner position.
    pub origin: Point,
    /// Where the host fetches the bitmap from.
    pub source: String,
    #[serde(skip)]
    pub(crate) load_state: LoadState,
}

impl Image {
    /// Create a new image shape.
    pub fn new(origin: Point, source: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            origin,
            source: source.into(),
            load_state: LoadState::Unrequested,
        }
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn is_loaded(&self) -> bool {
        self.load_state == LoadState::Loaded
    }

    /// Move to `Pending` if the bitmap was never requested.
    /// Returns true when the caller should issue the request.
    pub(crate) fn begin_loading(&mut self) -> bool {
        if self.load_state == LoadState::Unrequested {
            self.load_state = LoadState::Pending;
            true
        } else {
            false
        }
    }

    /// Record that the bitmap finished loading.
    /// Returns true only on the first transition into `Loaded`.
    pub(crate) fn finish_loading(&mut self) -> bool {
        match self.load_state {
            LoadState::Loaded | LoadState::Failed => false,
            LoadState::Unrequested | LoadState::Pending => {
                self.load_state = LoadState::Loaded;
                true
            }
        }
    }

    pub(crate) fn fail_loading(&mut self) {
        if self.load_state != LoadState::Loaded {
            self.load_state = LoadState::Failed;
        }
    }
}

impl ShapeTrait for Image {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn position(&self) -> Point {
        self.origin
    }

    fn set_position(&mut self, position: Point) {
        self.origin = position;
    }

    fn is_draggable(&self) -> bool {
        false
    }

    fn draw(&self, surface: &mut dyn DrawSurface, _selected: bool, _style: &DrawStyle) {
        if self.is_loaded() {
            surface.draw_bitmap(self.id, &self.source, self.origin);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};
    use kurbo::Size;

    #[test]
    fn test_image_is_never_hit_or_dragged() {
        let img = Image::new(Point::ZERO, "/api/get-frame?movie_id=1");
        assert!(!img.is_draggable());
        assert!(!img.hit_test(Point::new(1.0, 1.0)));
    }

    #[test]
    fn test_unloaded_image_draws_nothing() {
        let img = Image::new(Point::ZERO, "frame.jpg");
        let mut surface = RecordingSurface::new(Size::new(100.0, 100.0));
        img.draw(&mut surface, false, &DrawStyle::default());
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn test_loaded_image_blits_at_origin() {
        let mut img = Image::new(Point::new(5.0, 7.0), "frame.jpg");
        assert!(img.begin_loading());
        assert!(img.finish_loading());

        let mut surface = RecordingSurface::new(Size::new(100.0, 100.0));
        img.draw(&mut surface, false, &DrawStyle::default());
        assert_eq!(
            surface.commands(),
            &[DrawCommand::DrawBitmap {
                shape: img.id(),
                source: "frame.jpg".to_string(),
                origin: Point::new(5.0, 7.0),
            }]
        );
    }

    #[test]
    fn test_load_transitions() {
        let mut img = Image::new(Point::ZERO, "frame.jpg");
        assert_eq!(img.load_state(), LoadState::Unrequested);
        assert!(img.begin_loading());
        assert!(!img.begin_loading());
        assert_eq!(img.load_state(), LoadState::Pending);
        assert!(img.finish_loading());
        assert!(!img.finish_loading());
        img.fail_loading();
        assert_eq!(img.load_state(), LoadState::Loaded);
    }

    #[test]
    fn test_failed_image_stays_failed() {
        let mut img = Image::new(Point::ZERO, "broken.jpg");
        img.begin_loading();
        img.fail_loading();
        assert_eq!(img.load_state(), LoadState::Failed);
        assert!(!img.finish_loading());
        assert!(!img.begin_loading());
    }
}
