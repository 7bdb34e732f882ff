//! Pointer input events.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Pointer event in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
}

impl PointerEvent {
    pub fn down(x: f64, y: f64) -> Self {
        PointerEvent::Down { position: Point::new(x, y) }
    }

    pub fn moved(x: f64, y: f64) -> Self {
        PointerEvent::Move { position: Point::new(x, y) }
    }

    pub fn up(x: f64, y: f64) -> Self {
        PointerEvent::Up { position: Point::new(x, y) }
    }

    /// Viewport position carried by the event.
    pub fn position(&self) -> Point {
        match self {
            PointerEvent::Down { position }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position } => *position,
        }
    }
}

/// Translate a viewport position into canvas-local coordinates.
///
/// Only the canvas' top-left offset is removed; no scaling or DPI
/// correction is applied.
pub fn to_canvas(position: Point, canvas_origin: Point) -> Point {
    position - Vec2::new(canvas_origin.x, canvas_origin.y)
}
