//! Shape descriptors: the initialization input of an editor.

use crate::shapes::{Circle, Image, Rgba, Shape};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while turning descriptors into shapes.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Shape {index}: radius must be positive, got {radius}")]
    InvalidRadius { index: usize, radius: f64 },
    #[error("Shape {index}: coordinates must be finite")]
    NonFiniteCoordinate { index: usize },
    #[error("Shape {index}: unrecognized color {color:?}")]
    InvalidColor { index: usize, color: String },
    #[error("Shape {index}: image source is empty")]
    EmptySource { index: usize },
    #[error("Invalid descriptor JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn default_draggable() -> bool {
    true
}

/// Declarative description of one shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeDescriptor {
    Circle {
        x: f64,
        y: f64,
        r: f64,
        fill: String,
        stroke: String,
        #[serde(default)]
        name: String,
        #[serde(default = "default_draggable")]
        draggable: bool,
    },
    Image {
        x: f64,
        y: f64,
        url: String,
    },
}

impl ShapeDescriptor {
    /// A draggable circle descriptor.
    pub fn circle(x: f64, y: f64, r: f64, fill: &str, stroke: &str, name: &str) -> Self {
        ShapeDescriptor::Circle {
            x,
            y,
            r,
            fill: fill.to_string(),
            stroke: stroke.to_string(),
            name: name.to_string(),
            draggable: true,
        }
    }

    pub fn image(x: f64, y: f64, url: impl Into<String>) -> Self {
        ShapeDescriptor::Image { x, y, url: url.into() }
    }

    /// Parse a JSON array of descriptors.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>, EditorError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate and build the shape. `index` is only used in error messages.
    pub fn to_shape(&self, index: usize) -> Result<Shape, EditorError> {
        match self {
            ShapeDescriptor::Circle {
                x,
                y,
                r,
                fill,
                stroke,
                name,
                draggable,
            } => {
                if !x.is_finite() || !y.is_finite() {
                    return Err(EditorError::NonFiniteCoordinate { index });
                }
                if !r.is_finite() || *r <= 0.0 {
                    return Err(EditorError::InvalidRadius { index, radius: *r });
                }
                let fill = parse_color(index, fill)?;
                let stroke = parse_color(index, stroke)?;
                let circle = Circle::new(Point::new(*x, *y), *r, fill, stroke, name.clone())
                    .with_draggable(*draggable);
                Ok(Shape::Circle(circle))
            }
            ShapeDescriptor::Image { x, y, url } => {
                if !x.is_finite() || !y.is_finite() {
                    return Err(EditorError::NonFiniteCoordinate { index });
                }
                if url.trim().is_empty() {
                    return Err(EditorError::EmptySource { index });
                }
                Ok(Shape::Image(Image::new(Point::new(*x, *y), url.clone())))
            }
        }
    }
}

fn parse_color(index: usize, color: &str) -> Result<Rgba, EditorError> {
    Rgba::parse_css(color).ok_or_else(|| EditorError::InvalidColor {
        index,
        color: color.to_string(),
    })
}

/// Shapes placed on a freshly opened movie: the first frame (when a frame
/// URL is given) under a red and a blue marker.
pub fn default_markers(frame_url: Option<&str>) -> Vec<ShapeDescriptor> {
    let mut descriptors = Vec::new();
    if let Some(url) = frame_url {
        descriptors.push(ShapeDescriptor::image(0.0, 0.0, url));
    }
    descriptors.push(ShapeDescriptor::circle(50.0, 50.0, 10.0, "red", "white", "red ball"));
    descriptors.push(ShapeDescriptor::circle(10.0, 50.0, 10.0, "blue", "white", "blue ball"));
    descriptors
}
