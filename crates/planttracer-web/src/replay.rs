//! Headless replay of pointer sessions.
//!
//! A replay script lists the initial shapes and a sequence of pointer
//! events. The events run through an [`Editor`] backed by a
//! [`RecordingSurface`]; image bitmaps are reported ready as soon as they
//! are requested, the way a browser would after a fast load.

use kurbo::{Point, Size};
use planttracer_core::{
    Cursor, Editor, EditorConfig, EditorError, PointerEvent, RecordingSurface, Shape, ShapeDescriptor, ShapeId,
    default_markers,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Replay errors.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid replay script: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Editor(#[from] EditorError),
}

/// Canvas geometry used for a replay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSpec {
    pub width: f64,
    pub height: f64,
    /// Canvas top-left in viewport coordinates.
    pub origin: Point,
}

impl Default for CanvasSpec {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 480.0,
            origin: Point::ZERO,
        }
    }
}

/// Input of a replay run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayScript {
    #[serde(default)]
    pub canvas: CanvasSpec,
    #[serde(default)]
    pub config: EditorConfig,
    pub shapes: Vec<ShapeDescriptor>,
    #[serde(default)]
    pub events: Vec<PointerEvent>,
}

impl ReplayScript {
    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ReplayError> {
        let json = std::fs::read_to_string(path).map_err(|source| ReplayError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// The two-ball scene dragged from (50, 50) to (100, 100).
    pub fn demo() -> Self {
        Self {
            canvas: CanvasSpec::default(),
            config: EditorConfig::default(),
            shapes: default_markers(None),
            events: vec![
                PointerEvent::down(50.0, 50.0),
                PointerEvent::moved(75.0, 75.0),
                PointerEvent::moved(100.0, 100.0),
                PointerEvent::up(100.0, 100.0),
            ],
        }
    }
}

/// Final state after a replay.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub shapes: Vec<Shape>,
    pub selection: Option<ShapeId>,
    pub cursor: Cursor,
    /// Full redraws performed, including the initial one.
    pub frames: usize,
}

fn load_requested_bitmaps(editor: &mut Editor<RecordingSurface>) {
    for request in editor.take_bitmap_requests() {
        log::debug!("Loading {}", request.source);
        editor.bitmap_ready(request.shape);
    }
}

/// Run `script` to completion.
pub fn run(script: &ReplayScript) -> Result<ReplayReport, ReplayError> {
    let surface = RecordingSurface::new(Size::new(script.canvas.width, script.canvas.height))
        .with_origin(script.canvas.origin);
    let mut editor = Editor::new(surface, script.config.clone());

    editor.initialize(&script.shapes)?;
    load_requested_bitmaps(&mut editor);

    for event in &script.events {
        let response = editor.handle_pointer_event(*event);
        log::trace!("{event:?} -> {response:?}");
        load_requested_bitmaps(&mut editor);
    }

    Ok(ReplayReport {
        shapes: editor.scene().iter().cloned().collect(),
        selection: editor.selection(),
        cursor: editor.surface().cursor(),
        frames: editor.surface().frame_count(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_moves_red_ball() {
        let report = run(&ReplayScript::demo()).unwrap();
        assert_eq!(report.shapes.len(), 2);
        assert_eq!(report.shapes[0].position(), Point::new(100.0, 100.0));
        assert_eq!(report.shapes[1].position(), Point::new(10.0, 50.0));
        assert_eq!(report.selection, None);
        assert_eq!(report.cursor, Cursor::Auto);
        // initial + down + two moves + up
        assert_eq!(report.frames, 5);
    }

    #[test]
    fn test_script_from_json() {
        let script = ReplayScript::from_json(
            r#"{
                "canvas": {"origin": {"x": 10.0, "y": 10.0}},
                "shapes": [
                    {"type": "image", "x": 0, "y": 0, "url": "/frame.jpg"},
                    {"type": "circle", "x": 20, "y": 20, "r": 5, "fill": "green", "stroke": "black", "name": "tip"}
                ],
                "events": [
                    {"type": "down", "position": {"x": 30.0, "y": 30.0}},
                    {"type": "move", "position": {"x": 60.0, "y": 70.0}}
                ]
            }"#,
        )
        .unwrap();
        assert!((script.canvas.width - 640.0).abs() < f64::EPSILON);

        let report = run(&script).unwrap();
        assert_eq!(report.shapes[1].position(), Point::new(50.0, 60.0));
        assert!(report.selection.is_some());
        assert_eq!(report.cursor, Cursor::Crosshair);
        assert!(report.shapes[0].as_image().is_some_and(|i| i.is_loaded()));
        // initial + bitmap ready + down + move
        assert_eq!(report.frames, 4);
    }

    #[test]
    fn test_invalid_shape_is_reported() {
        let script = ReplayScript {
            shapes: vec![ShapeDescriptor::circle(0.0, 0.0, 0.0, "red", "white", "flat")],
            ..ReplayScript::demo()
        };
        assert!(matches!(run(&script), Err(ReplayError::Editor(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = ReplayScript::from_path(Path::new("/nonexistent/replay.json")).unwrap_err();
        assert!(matches!(err, ReplayError::Io { .. }));
    }
}
