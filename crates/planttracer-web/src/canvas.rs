//! `DrawSurface` backed by an HTML canvas 2D context.

use crate::dom::{WebError, WebResult, element_as};
use kurbo::{Circle, Point, Rect, Size};
use peniko::Color;
use planttracer_core::{Cursor, DrawSurface, Rgba, ShapeId};
use std::collections::HashMap;
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

/// Draws onto a `<canvas>` element.
///
/// Bitmaps are kept per image shape; the loader registers each element once
/// it has finished loading.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    bitmaps: HashMap<ShapeId, HtmlImageElement>,
}

impl CanvasSurface {
    /// Wrap the canvas with DOM id `canvas_id`.
    pub fn from_id(canvas_id: &str) -> WebResult<Self> {
        let canvas: HtmlCanvasElement = element_as(canvas_id, "canvas")?;
        Self::new(canvas)
    }

    pub fn new(canvas: HtmlCanvasElement) -> WebResult<Self> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| WebError::Js("2d context unavailable".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| WebError::Js("context is not a CanvasRenderingContext2d".to_string()))?;
        Ok(Self {
            canvas,
            ctx,
            bitmaps: HashMap::new(),
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Register the element holding the bitmap for image `shape`.
    pub fn insert_bitmap(&mut self, shape: ShapeId, image: HtmlImageElement) {
        self.bitmaps.insert(shape, image);
    }

    fn circle_path(&self, circle: Circle) -> bool {
        self.ctx.begin_path();
        match self
            .ctx
            .arc(circle.center.x, circle.center.y, circle.radius, 0.0, TAU)
        {
            Ok(()) => true,
            Err(e) => {
                log::warn!("arc failed: {e:?}");
                false
            }
        }
    }
}

impl DrawSurface for CanvasSurface {
    fn size(&self) -> Size {
        Size::new(self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn origin(&self) -> Point {
        let rect = self.canvas.get_bounding_client_rect();
        Point::new(rect.left(), rect.top())
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.ctx.clear_rect(rect.x0, rect.y0, rect.width(), rect.height());
    }

    fn fill_circle(&mut self, circle: Circle, color: Color) {
        if self.circle_path(circle) {
            self.ctx.set_fill_style_str(&Rgba::from(color).to_css());
            self.ctx.fill();
        }
    }

    fn stroke_circle(&mut self, circle: Circle, color: Color, width: f64) {
        if self.circle_path(circle) {
            self.ctx.set_line_width(width);
            self.ctx.set_stroke_style_str(&Rgba::from(color).to_css());
            self.ctx.stroke();
        }
    }

    fn draw_bitmap(&mut self, shape: ShapeId, source: &str, origin: Point) {
        let Some(image) = self.bitmaps.get(&shape) else {
            log::debug!("No bitmap registered for {source}");
            return;
        };
        if let Err(e) = self
            .ctx
            .draw_image_with_html_image_element(image, origin.x, origin.y)
        {
            log::warn!("drawImage({source}) failed: {e:?}");
        }
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        if let Err(e) = self.canvas.style().set_property("cursor", cursor.as_css()) {
            log::warn!("Could not set cursor: {e:?}");
        }
    }

    fn release_bitmaps(&mut self) {
        log::debug!("Releasing {} cached bitmaps", self.bitmaps.len());
        self.bitmaps.clear();
    }
}
