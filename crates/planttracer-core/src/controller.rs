//! Interaction controller: turns pointer events into selection and drag updates.

use crate::input::{PointerEvent, to_canvas};
use crate::scene::Scene;
use crate::shapes::{DrawStyle, ShapeId};
use crate::surface::{Cursor, DrawSurface};

/// What handling one pointer event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControllerResponse {
    /// A full redraw was issued.
    pub redrawn: bool,
    /// The selection differs from before the event.
    pub selection_changed: bool,
}

/// Single-selection drag state machine.
///
/// * down: clear the selection, grab the first draggable shape under the
///   pointer (insertion order), show a crosshair if one was grabbed, redraw.
/// * move: while something is grabbed, snap its position to the pointer and
///   redraw. Otherwise nothing happens.
/// * up: release, reset the cursor, redraw.
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    pointer_down: bool,
    selection: Option<ShapeId>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// The shape currently grabbed by the pointer.
    pub fn selection(&self) -> Option<ShapeId> {
        self.selection
    }

    pub fn is_pointer_down(&self) -> bool {
        self.pointer_down
    }

    /// Drop the selection without touching the cursor.
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Forget all interaction state.
    pub fn reset(&mut self) {
        self.pointer_down = false;
        self.selection = None;
    }

    /// Process a pointer event against `scene`, redrawing onto `surface`.
    pub fn handle_pointer_event(
        &mut self,
        event: PointerEvent,
        scene: &mut Scene,
        surface: &mut dyn DrawSurface,
        style: &DrawStyle,
    ) -> ControllerResponse {
        let previous = self.selection;
        let position = to_canvas(event.position(), surface.origin());

        let redrawn = match event {
            PointerEvent::Down { .. } => {
                self.pointer_down = true;
                self.clear_selection();
                self.selection = scene.grab_at(position);
                if let Some(id) = self.selection {
                    if let Some(shape) = scene.get(id) {
                        log::debug!("Grabbed {} at ({}, {})", shape.name(), position.x, position.y);
                    }
                    surface.set_cursor(Cursor::Crosshair);
                }
                true
            }
            PointerEvent::Move { .. } => match self.selection.and_then(|id| scene.get_mut(id)) {
                Some(shape) => {
                    shape.set_position(position);
                    true
                }
                None => false,
            },
            PointerEvent::Up { .. } => {
                self.pointer_down = false;
                self.clear_selection();
                surface.set_cursor(Cursor::Auto);
                true
            }
        };

        if redrawn {
            scene.render(surface, self.selection, style);
        }

        ControllerResponse {
            redrawn,
            selection_changed: previous != self.selection,
        }
    }
}
