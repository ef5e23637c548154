use mailforge_core::ElementId;

use crate::element_store::ElementStore;
use crate::model::Point;

/// Tracks the single selected element.
///
/// The editor allows at most one selected element. Selecting another element
/// replaces the selection; pressing empty canvas clears it.
#[derive(Debug, Clone, Default)]
pub struct SelectionManager {
    selected_id: Option<ElementId>,
}

impl SelectionManager {
    /// Creates a new `SelectionManager` with no selection.
    ///
    /// ```
    /// use mailforge_designer::selection_manager::SelectionManager;
    ///
    /// let manager = SelectionManager::new();
    /// assert_eq!(manager.selected_id(), None);
    /// ```
    pub fn new() -> Self {
        Self { selected_id: None }
    }

    pub fn selected_id(&self) -> Option<ElementId> {
        self.selected_id
    }

    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selected_id == Some(id)
    }

    pub fn set_selected_id(&mut self, id: Option<ElementId>) {
        self.selected_id = id;
    }

    /// Selects `id` if the store holds it. Returns the new selection.
    pub fn select_id(&mut self, store: &ElementStore, id: ElementId) -> Option<ElementId> {
        if store.contains(id) {
            self.selected_id = Some(id);
        }
        self.selected_id
    }

    pub fn clear(&mut self) {
        self.selected_id = None;
    }

    /// Topmost visible element containing `point`.
    pub fn hit_test(store: &ElementStore, point: Point) -> Option<ElementId> {
        store
            .iter()
            .rev()
            .find(|e| e.is_visible() && e.contains_point(point))
            .map(|e| e.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Element, ElementKind, ElementType};

    fn store_with_overlap() -> (ElementStore, ElementId, ElementId) {
        let mut store = ElementStore::new();
        let bottom = store.generate_id();
        store.push(Element::new(
            bottom,
            ElementKind::default_for(ElementType::Rectangle),
            0.0,
            0.0,
            100.0,
            100.0,
        ));
        let top = store.generate_id();
        store.push(Element::new(
            top,
            ElementKind::default_for(ElementType::Circle),
            50.0,
            50.0,
            100.0,
            100.0,
        ));
        (store, bottom, top)
    }

    #[test]
    fn test_hit_test_prefers_topmost() {
        let (store, bottom, top) = store_with_overlap();
        assert_eq!(
            SelectionManager::hit_test(&store, Point::new(75.0, 75.0)),
            Some(top)
        );
        assert_eq!(
            SelectionManager::hit_test(&store, Point::new(10.0, 10.0)),
            Some(bottom)
        );
        assert_eq!(
            SelectionManager::hit_test(&store, Point::new(500.0, 500.0)),
            None
        );
    }

    #[test]
    fn test_hidden_elements_are_not_hit() {
        let (mut store, bottom, top) = store_with_overlap();
        if let Some(el) = store.get_mut(top) {
            el.hidden = true;
        }
        assert_eq!(
            SelectionManager::hit_test(&store, Point::new(75.0, 75.0)),
            Some(bottom)
        );
    }

    #[test]
    fn test_select_id_ignores_unknown() {
        let (mut store, bottom, top) = store_with_overlap();
        let mut selection = SelectionManager::new();
        assert_eq!(selection.select_id(&store, bottom), Some(bottom));

        store.remove(top);
        assert_eq!(selection.select_id(&store, top), Some(bottom));
    }
}
