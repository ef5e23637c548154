//! Pointer interaction: click-to-select and bounds-clamped dragging.
//!
//! Positions passed in here are screen pixels relative to the canvas
//! surface. A drag is tracked by a [`DragSession`] owned by the canvas; it is
//! dropped on release so nothing keeps listening once the pointer is up.

use mailforge_core::ElementId;

use super::{Canvas, PointerButton, PointerOutcome};
use crate::model::Point;
use crate::patch::ElementPatch;

/// Pointer and element origins captured when a drag starts.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    element_id: ElementId,
    pointer_origin: Point,
    element_origin: Point,
    moved: bool,
}

impl DragSession {
    pub fn element_id(&self) -> ElementId {
        self.element_id
    }

    pub fn pointer_origin(&self) -> Point {
        self.pointer_origin
    }

    pub fn element_origin(&self) -> Point {
        self.element_origin
    }

    /// True once a move actually changed the element's position.
    pub fn has_moved(&self) -> bool {
        self.moved
    }
}

impl Canvas {
    /// Handles a pointer press that landed on `target` (or on empty canvas).
    ///
    /// A primary press on a visible element selects it; the press is
    /// consumed and does not also reach the background. Unlocked elements
    /// start a drag. A press on empty canvas clears the selection.
    pub fn pointer_down(
        &mut self,
        target: Option<ElementId>,
        button: PointerButton,
        position: Point,
    ) -> PointerOutcome {
        if button != PointerButton::Primary {
            return PointerOutcome::Ignored;
        }
        self.drag = None;

        let target = target.and_then(|id| self.element_store.get(id)).filter(|e| e.is_visible());
        let Some(element) = target else {
            self.selection_manager.clear();
            return PointerOutcome::Deselected;
        };

        let id = element.id;
        let draggable = element.is_draggable();
        let element_origin = Point::new(element.x, element.y);
        self.selection_manager.set_selected_id(Some(id));

        if !draggable {
            return PointerOutcome::Selected(id);
        }
        self.drag = Some(DragSession {
            element_id: id,
            pointer_origin: position,
            element_origin,
            moved: false,
        });
        PointerOutcome::DragStarted(id)
    }

    /// Hit-tests `position` and forwards to [`Canvas::pointer_down`].
    pub fn press_at(&mut self, button: PointerButton, position: Point) -> PointerOutcome {
        let canvas_point = self.viewport().screen_to_canvas(position.x, position.y);
        let target = self.hit_test(canvas_point);
        self.pointer_down(target, button, position)
    }

    /// Moves the dragged element by the pointer delta since the press,
    /// scaled by the zoom and clamped into the canvas. Returns true if the
    /// element moved.
    pub fn pointer_move(&mut self, position: Point) -> bool {
        let Some(session) = self.drag.as_ref() else {
            return false;
        };
        if !position.x.is_finite() || !position.y.is_finite() {
            return false;
        }

        let (dx, dy) = self.viewport().screen_delta_to_canvas(
            position.x - session.pointer_origin.x,
            position.y - session.pointer_origin.y,
        );
        let id = session.element_id;
        let target = Point::new(session.element_origin.x + dx, session.element_origin.y + dy);

        let moved = self.update_element(id, &ElementPatch::position(target.x, target.y));
        if moved {
            if let Some(session) = self.drag.as_mut() {
                session.moved = true;
            }
        }
        moved
    }

    /// Ends the drag, returning the finished session if there was one.
    pub fn pointer_up(&mut self) -> Option<DragSession> {
        self.drag.take()
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }
}
