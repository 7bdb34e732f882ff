//! Scene model: the ordered shapes on one annotation canvas.

use crate::shapes::{DrawStyle, Shape, ShapeId};
use crate::surface::DrawSurface;
use kurbo::Point;

/// A request for the host to load the bitmap behind an image shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitmapRequest {
    pub shape: ShapeId,
    pub source: String,
}

/// Ordered shapes plus the pending bitmap loads they asked for.
///
/// Insertion order is the base draw order. Rendering paints unselected
/// shapes first and the selected shape last, so the grabbed marker stays on
/// top even when it was inserted early.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    shapes: Vec<Shape>,
    bitmap_requests: Vec<BitmapRequest>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shape. No uniqueness check is made.
    pub fn add(&mut self, shape: impl Into<Shape>) -> ShapeId {
        let shape = shape.into();
        let id = shape.id();
        self.shapes.push(shape);
        id
    }

    /// Remove every shape and forget queued bitmap requests.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.bitmap_requests.clear();
    }

    /// Get a shape by ID.
    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    /// Get a mutable reference to a shape by ID.
    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id() == id)
    }

    /// Shapes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// First draggable shape (in insertion order) containing `point`.
    pub fn grab_at(&self, point: Point) -> Option<ShapeId> {
        self.shapes
            .iter()
            .find(|s| s.is_draggable() && s.hit_test(point))
            .map(|s| s.id())
    }

    /// Paint order for the given selection: unselected shapes in insertion
    /// order, then the selected shape.
    pub fn draw_order(&self, selection: Option<ShapeId>) -> Vec<ShapeId> {
        let unselected = self.shapes.iter().filter(|s| !s.is_selected(selection));
        let selected = self.shapes.iter().filter(|s| s.is_selected(selection));
        unselected.chain(selected).map(|s| s.id()).collect()
    }

    /// Clear the surface and draw every shape in two passes.
    ///
    /// Images whose bitmap was never requested are skipped and queue a
    /// [`BitmapRequest`] instead.
    pub fn render(&mut self, surface: &mut dyn DrawSurface, selection: Option<ShapeId>, style: &DrawStyle) {
        let bounds = surface.bounds();
        surface.clear_rect(bounds);

        for pass_selected in [false, true] {
            for shape in &mut self.shapes {
                if shape.is_selected(selection) != pass_selected {
                    continue;
                }
                if let Some(image) = shape.as_image_mut() {
                    if image.begin_loading() {
                        log::debug!("Requesting bitmap {}", image.source);
                        self.bitmap_requests.push(BitmapRequest {
                            shape: image.id,
                            source: image.source.clone(),
                        });
                    }
                }
                shape.draw(surface, pass_selected, style);
            }
        }
    }

    /// Drain the queued bitmap requests.
    pub fn take_bitmap_requests(&mut self) -> Vec<BitmapRequest> {
        std::mem::take(&mut self.bitmap_requests)
    }

    /// Mark an image's bitmap as loaded. Returns true the first time only.
    pub(crate) fn mark_bitmap_loaded(&mut self, id: ShapeId) -> bool {
        self.get_mut(id)
            .and_then(Shape::as_image_mut)
            .map(|image| image.finish_loading())
            .unwrap_or(false)
    }

    /// Mark an image's bitmap as permanently unavailable.
    pub(crate) fn mark_bitmap_failed(&mut self, id: ShapeId) -> bool {
        match self.get_mut(id).and_then(Shape::as_image_mut) {
            Some(image) => {
                image.fail_loading();
                true
            }
            None => false,
        }
    }
}
