//! PlantTracer Core Library
//!
//! Platform-agnostic frame annotation editor (scene, shapes, pointer
//! interaction) and the page logic of the PlantTracer site.

pub mod config;
pub mod controller;
pub mod descriptor;
pub mod editor;
pub mod input;
pub mod scene;
pub mod shapes;
pub mod site;
pub mod surface;

pub use config::{EditorConfig, SiteConfig};
pub use controller::{ControllerResponse, InteractionController};
pub use descriptor::{EditorError, ShapeDescriptor, default_markers};
pub use editor::Editor;
pub use input::PointerEvent;
pub use scene::{BitmapRequest, Scene};
pub use shapes::{Circle, Image, LoadState, Rgba, Shape, ShapeId, ShapeTrait};
pub use site::SiteError;
pub use surface::{Cursor, DrawCommand, DrawSurface, RecordingSurface};
