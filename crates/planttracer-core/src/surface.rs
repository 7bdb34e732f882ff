//! Draw surface abstraction.
//!
//! The editor never talks to a browser canvas directly. It issues a small set
//! of 2D calls through [`DrawSurface`]; the web crate backs it with a
//! `CanvasRenderingContext2d`, tests and the replay tool with
//! [`RecordingSurface`].

use crate::shapes::{Rgba, ShapeId};
use kurbo::{Circle, Point, Rect, Size};
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Cursor style shown over the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cursor {
    #[default]
    Auto,
    Crosshair,
}

impl Cursor {
    /// CSS `cursor` property value.
    pub fn as_css(self) -> &'static str {
        match self {
            Cursor::Auto => "auto",
            Cursor::Crosshair => "crosshair",
        }
    }
}

/// Target of a draw pass.
pub trait DrawSurface {
    /// Drawable size in canvas units.
    fn size(&self) -> Size;

    /// Top-left corner of the surface in viewport coordinates.
    fn origin(&self) -> Point;

    /// Clear a rectangle to transparent.
    fn clear_rect(&mut self, rect: Rect);

    /// Fill a circle.
    fn fill_circle(&mut self, circle: Circle, color: Color);

    /// Stroke a circle's outline.
    fn stroke_circle(&mut self, circle: Circle, color: Color, width: f64);

    /// Blit the bitmap loaded for `shape` with its top-left at `origin`.
    fn draw_bitmap(&mut self, shape: ShapeId, source: &str, origin: Point);

    /// Change the cursor shown over the surface.
    fn set_cursor(&mut self, cursor: Cursor);

    /// Drop every cached bitmap. Called when the scene is replaced, since
    /// the old image shapes and their ids are gone.
    fn release_bitmaps(&mut self) {}

    /// The full drawable rectangle.
    fn bounds(&self) -> Rect {
        self.size().to_rect()
    }
}

/// A single call recorded by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    ClearRect {
        rect: Rect,
    },
    FillCircle {
        center: Point,
        radius: f64,
        color: Rgba,
    },
    StrokeCircle {
        center: Point,
        radius: f64,
        color: Rgba,
        width: f64,
    },
    DrawBitmap {
        shape: ShapeId,
        source: String,
        origin: Point,
    },
    SetCursor {
        cursor: Cursor,
    },
}

/// Headless surface that records every call.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    size: Size,
    origin: Point,
    cursor: Cursor,
    commands: Vec<DrawCommand>,
    bitmap_releases: usize,
}

impl RecordingSurface {
    /// Create a surface of the given size placed at the viewport origin.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Place the surface at `origin` in viewport coordinates.
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the recorded commands.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// The cursor most recently set.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// How many times the bitmap cache was released.
    pub fn bitmap_releases(&self) -> usize {
        self.bitmap_releases
    }

    /// Centers of filled circles, in paint order.
    pub fn filled_centers(&self) -> Vec<Point> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::FillCircle { center, .. } => Some(*center),
                _ => None,
            })
            .collect()
    }

    /// Number of full clears, which equals the number of frames rendered.
    pub fn frame_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::ClearRect { .. }))
            .count()
    }
}

impl DrawSurface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn origin(&self) -> Point {
        self.origin
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::ClearRect { rect });
    }

    fn fill_circle(&mut self, circle: Circle, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center: circle.center,
            radius: circle.radius,
            color: color.into(),
        });
    }

    fn stroke_circle(&mut self, circle: Circle, color: Color, width: f64) {
        self.commands.push(DrawCommand::StrokeCircle {
            center: circle.center,
            radius: circle.radius,
            color: color.into(),
            width,
        });
    }

    fn draw_bitmap(&mut self, shape: ShapeId, source: &str, origin: Point) {
        self.commands.push(DrawCommand::DrawBitmap {
            shape,
            source: source.to_string(),
            origin,
        });
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
        self.commands.push(DrawCommand::SetCursor { cursor });
    }

    fn release_bitmaps(&mut self) {
        self.bitmap_releases += 1;
    }
}
