//! Snapshot-based undo/redo.

use mailforge_core::ElementId;

use crate::canvas::{Canvas, CanvasSize};
use crate::model::Element;

pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Design state captured before a mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignSnapshot {
    pub size: CanvasSize,
    pub elements: Vec<Element>,
    pub selected: Option<ElementId>,
}

impl Canvas {
    pub fn snapshot(&self) -> DesignSnapshot {
        DesignSnapshot {
            size: self.size(),
            elements: self.elements().to_vec(),
            selected: self.selected_id(),
        }
    }

    /// Restores a snapshot. The id allocator keeps moving forward, so ids
    /// handed out after the snapshot was taken are not reused.
    pub fn restore_snapshot(&mut self, snapshot: DesignSnapshot) {
        self.restore_elements(snapshot.elements);
        self.set_size(snapshot.size);
        if let Some(id) = snapshot.selected {
            self.select(id);
        }
    }
}

#[derive(Debug, Clone)]
pub struct History {
    undo_stack: Vec<DesignSnapshot>,
    redo_stack: Vec<DesignSnapshot>,
    limit: usize,
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Pushes the state from before a mutation and drops the redo branch.
    pub fn record(&mut self, before: DesignSnapshot) {
        self.undo_stack.push(before);
        self.redo_stack.clear();
        if self.undo_stack.len() > self.limit {
            self.undo_stack.remove(0);
        }
    }

    /// Returns the state to go back to, stashing `current` for redo.
    pub fn undo(&mut self, current: DesignSnapshot) -> Option<DesignSnapshot> {
        let previous = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        Some(previous)
    }

    pub fn redo(&mut self, current: DesignSnapshot) -> Option<DesignSnapshot> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ElementType;

    #[test]
    fn test_limit_drops_oldest() {
        let canvas = Canvas::new();
        let mut history = History::new(3);
        for _ in 0..5 {
            history.record(canvas.snapshot());
        }
        assert_eq!(history.undo_len(), 3);
    }

    #[test]
    fn test_undo_redo_roundtrip() {
        let mut canvas = Canvas::new();
        let mut history = History::default();

        history.record(canvas.snapshot());
        let id = canvas.add_element(ElementType::Text);

        let previous = history.undo(canvas.snapshot()).unwrap();
        canvas.restore_snapshot(previous);
        assert_eq!(canvas.element_count(), 0);
        assert!(history.can_redo());

        let next = history.redo(canvas.snapshot()).unwrap();
        canvas.restore_snapshot(next);
        assert_eq!(canvas.element_store.ids(), vec![id]);
        assert_eq!(canvas.selected_id(), Some(id));

        // a fresh id never collides with one handed out before the undo
        let other = canvas.add_element(ElementType::Circle);
        assert!(other > id);
    }

    #[test]
    fn test_new_record_clears_redo() {
        let canvas = Canvas::new();
        let mut history = History::default();
        history.record(canvas.snapshot());
        history.undo(canvas.snapshot());
        history.record(canvas.snapshot());
        assert!(!history.can_redo());
    }
}
