//! Circle marker shape.

use super::{DrawStyle, Rgba, ShapeId, ShapeTrait};
use crate::surface::DrawSurface;
use kurbo::{Circle as KurboCircle, Point};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn default_draggable() -> bool {
    true
}

/// A filled, outlined circle that the pointer can drag around.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circle {
    pub(crate) id: ShapeId,
    /// Center point.
    pub center: Point,
    /// Radius (always positive).
    pub radius: f64,
    /// Fill color.
    pub fill: Rgba,
    /// Outline color.
    pub stroke: Rgba,
    /// Display name.
    pub name: String,
    /// Whether the pointer may grab this circle.
    #[serde(default = "default_draggable")]
    pub draggable: bool,
}

impl Circle {
    /// Create a new draggable circle.
    pub fn new(center: Point, radius: f64, fill: Rgba, stroke: Rgba, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            center,
            radius,
            fill,
            stroke,
            name: name.into(),
            draggable: true,
        }
    }

    /// Set the draggable flag.
    pub fn with_draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    /// Get as a kurbo Circle.
    pub fn as_kurbo(&self) -> KurboCircle {
        KurboCircle::new(self.center, self.radius)
    }
}

impl ShapeTrait for Circle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn position(&self) -> Point {
        self.center
    }

    fn set_position(&mut self, position: Point) {
        self.center = position;
    }

    fn is_draggable(&self) -> bool {
        self.draggable
    }

    fn hit_test(&self, point: Point) -> bool {
        // Squared distance against squared radius; the boundary counts as inside.
        (point - self.center).hypot2() <= self.radius * self.radius
    }

    fn draw(&self, surface: &mut dyn DrawSurface, selected: bool, style: &DrawStyle) {
        let opacity = if selected { style.selected_opacity } else { 1.0 };
        let circle = self.as_kurbo();
        surface.fill_circle(circle, self.fill.with_opacity(opacity));
        surface.stroke_circle(circle, self.stroke.with_opacity(opacity), style.stroke_width);
    }
}
