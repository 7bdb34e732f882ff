//! Shape definitions for the annotation canvas.

mod circle;
mod image;

pub use circle::Circle;
pub use image::{Image, LoadState};

use crate::surface::DrawSurface;
use kurbo::Point;
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Parse any CSS color a canvas accepts as a fill style: the full named
    /// color table, hex notation and the `rgb()`/`hsl()` family.
    pub fn parse_css(css: &str) -> Option<Self> {
        css.parse::<Color>().ok().map(Self::from)
    }

    /// Convert to a peniko color with `opacity` multiplied into the alpha channel.
    pub fn with_opacity(self, opacity: f64) -> Color {
        let alpha = (self.a as f64 * opacity.clamp(0.0, 1.0)).round() as u8;
        Color::from_rgba8(self.r, self.g, self.b, alpha)
    }

    /// CSS `rgba()` notation, as accepted by a 2D canvas context.
    pub fn to_css(self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.r,
            self.g,
            self.b,
            self.a as f64 / 255.0
        )
    }
}

impl From<Color> for Rgba {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<Rgba> for Color {
    fn from(color: Rgba) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Paint settings shared by every shape during a draw pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawStyle {
    /// Outline width for circles.
    pub stroke_width: f64,
    /// Opacity applied to the shape currently grabbed by the pointer.
    pub selected_opacity: f64,
}

impl Default for DrawStyle {
    fn default() -> Self {
        Self {
            stroke_width: 3.0,
            selected_opacity: 0.5,
        }
    }
}

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Capabilities every shape on the canvas provides.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// The anchor point moved by dragging (center for circles, origin for images).
    fn position(&self) -> Point;

    /// Move the anchor point.
    fn set_position(&mut self, position: Point);

    /// Whether the pointer may grab this shape.
    fn is_draggable(&self) -> bool;

    /// Check if a point (in canvas coordinates) hits this shape.
    ///
    /// Shapes without an interactive area keep the default, which never hits.
    fn hit_test(&self, _point: Point) -> bool {
        false
    }

    /// Check whether this shape is the current selection.
    fn is_selected(&self, selection: Option<ShapeId>) -> bool {
        selection == Some(self.id())
    }

    /// Issue the draw calls for this shape.
    fn draw(&self, surface: &mut dyn DrawSurface, selected: bool, style: &DrawStyle);
}

/// Enum wrapper for all shape types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Circle(Circle),
    Image(Image),
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Circle(s) => s.id(),
            Shape::Image(s) => s.id(),
        }
    }

    pub fn position(&self) -> Point {
        match self {
            Shape::Circle(s) => s.position(),
            Shape::Image(s) => s.position(),
        }
    }

    pub fn set_position(&mut self, position: Point) {
        match self {
            Shape::Circle(s) => s.set_position(position),
            Shape::Image(s) => s.set_position(position),
        }
    }

    pub fn is_draggable(&self) -> bool {
        match self {
            Shape::Circle(s) => s.is_draggable(),
            Shape::Image(s) => s.is_draggable(),
        }
    }

    pub fn hit_test(&self, point: Point) -> bool {
        match self {
            Shape::Circle(s) => s.hit_test(point),
            Shape::Image(s) => s.hit_test(point),
        }
    }

    pub fn is_selected(&self, selection: Option<ShapeId>) -> bool {
        match self {
            Shape::Circle(s) => s.is_selected(selection),
            Shape::Image(s) => s.is_selected(selection),
        }
    }

    pub fn draw(&self, surface: &mut dyn DrawSurface, selected: bool, style: &DrawStyle) {
        match self {
            Shape::Circle(s) => s.draw(surface, selected, style),
            Shape::Image(s) => s.draw(surface, selected, style),
        }
    }

    /// Display name used in logs.
    pub fn name(&self) -> &str {
        match self {
            Shape::Circle(c) => &c.name,
            Shape::Image(i) => &i.source,
        }
    }

    /// Get the circle if this shape is a circle.
    pub fn as_circle(&self) -> Option<&Circle> {
        match self {
            Shape::Circle(c) => Some(c),
            _ => None,
        }
    }

    /// Get the image if this shape is an image.
    pub fn as_image(&self) -> Option<&Image> {
        match self {
            Shape::Image(img) => Some(img),
            _ => None,
        }
    }

    /// Get the mutable image if this shape is an image.
    pub fn as_image_mut(&mut self) -> Option<&mut Image> {
        match self {
            Shape::Image(img) => Some(img),
            _ => None,
        }
    }
}

impl From<Circle> for Shape {
    fn from(circle: Circle) -> Self {
        Shape::Circle(circle)
    }
}

impl From<Image> for Shape {
    fn from(image: Image) -> Self {
        Shape::Image(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_colors() {
        assert_eq!(Rgba::parse_css("red"), Some(Rgba::rgb(255, 0, 0)));
        assert_eq!(Rgba::parse_css("White"), Some(Rgba::white()));
        assert_eq!(Rgba::parse_css(" blue "), Some(Rgba::rgb(0, 0, 255)));
        assert_eq!(Rgba::parse_css("chartreuse-ish"), None);
    }

    #[test]
    fn test_parse_hex_colors() {
        assert_eq!(Rgba::parse_css("#fff"), Some(Rgba::white()));
        assert_eq!(Rgba::parse_css("#003300"), Some(Rgba::rgb(0, 51, 0)));
        assert_eq!(Rgba::parse_css("#ff000080"), Some(Rgba::new(255, 0, 0, 128)));
        assert_eq!(Rgba::parse_css("#12"), None);
        assert_eq!(Rgba::parse_css("#zzzzzz"), None);
        assert_eq!(Rgba::parse_css("#+f+f+f"), None);
        assert_eq!(Rgba::parse_css("#-1-1-1"), None);
    }

    #[test]
    fn test_parse_extended_named_colors() {
        assert_eq!(Rgba::parse_css("darkgreen"), Some(Rgba::rgb(0, 100, 0)));
        assert_eq!(Rgba::parse_css("cornflowerblue"), Some(Rgba::rgb(100, 149, 237)));
        assert_eq!(Rgba::parse_css("transparent").map(|c| c.a), Some(0));
    }

    #[test]
    fn test_parse_color_functions() {
        assert_eq!(Rgba::parse_css("rgb(0,0,0)"), Some(Rgba::black()));
        assert_eq!(Rgba::parse_css("rgba(255, 0, 0, 0.5)"), Some(Rgba::new(255, 0, 0, 128)));
        assert_eq!(Rgba::parse_css("hsl(120, 100%, 50%)"), Some(Rgba::rgb(0, 255, 0)));
        assert_eq!(Rgba::parse_css("rgb(0, 0"), None);
    }

    #[test]
    fn test_with_opacity_halves_alpha() {
        let color: Rgba = Rgba::rgb(255, 0, 0).with_opacity(0.5).into();
        assert_eq!(color, Rgba::new(255, 0, 0, 128));
    }

    #[test]
    fn test_css_output() {
        assert_eq!(Rgba::rgb(0, 0, 255).to_css(), "rgba(0, 0, 255, 1)");
        assert_eq!(Rgba::transparent().to_css(), "rgba(0, 0, 0, 0)");
    }
}
