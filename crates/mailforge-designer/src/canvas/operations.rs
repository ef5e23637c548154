//! Element mutations on the canvas.
//!
//! Every edit, whether it comes from a drag, the properties panel or the
//! layers list, goes through [`Canvas::update_element`].

use mailforge_core::{DesignError, ElementId};

use super::{clamp_axis, clamp_element, Canvas};
use crate::model::{
    Element, ElementKind, ElementType, MergeTagDescriptor, MergeTagElement, TextElement,
};
use crate::patch::ElementPatch;

const HEADLINE_WIDTH: f64 = 300.0;
const HEADLINE_HEIGHT: f64 = 50.0;
const HEADLINE_TOP: f64 = 50.0;

impl Canvas {
    /// Adds a default-configured element of `ty` at the canvas center, on top
    /// of the z-order, and selects it.
    pub fn add_element(&mut self, ty: ElementType) -> ElementId {
        let kind = ElementKind::default_for(ty);
        self.insert_centered(kind)
    }

    /// Adds a merge-tag element for `descriptor` and selects it.
    pub fn add_merge_tag(&mut self, descriptor: &MergeTagDescriptor) -> ElementId {
        let kind = ElementKind::MergeTag(MergeTagElement::from_descriptor(descriptor));
        self.insert_centered(kind)
    }

    /// Adds a centered headline near the top edge and selects it.
    pub fn add_headline(&mut self, text: &str) -> ElementId {
        let id = self.element_store.generate_id();
        let x = clamp_axis(self.width() / 2.0 - 150.0, self.width(), HEADLINE_WIDTH);
        let y = clamp_axis(HEADLINE_TOP, self.height(), HEADLINE_HEIGHT);
        let element = Element::new(
            id,
            ElementKind::Text(TextElement::headline(text)),
            x,
            y,
            HEADLINE_WIDTH,
            HEADLINE_HEIGHT,
        );
        self.element_store.push(element);
        self.selection_manager.set_selected_id(Some(id));
        tracing::debug!("Added headline {}", id);
        id
    }

    fn insert_centered(&mut self, kind: ElementKind) -> ElementId {
        let ty = kind.element_type();
        let (width, height) = ty.default_size();
        let (x, y) = self.size().centered_origin(ty);
        let (x, y) = self.clamp_position(x, y, width, height);

        let id = self.element_store.generate_id();
        self.element_store
            .push(Element::new(id, kind, x, y, width, height));
        self.selection_manager.set_selected_id(Some(id));
        tracing::debug!("Added {} element {}", ty, id);
        id
    }

    /// Merges `patch` into the element with `id`.
    ///
    /// A patch that moves or resizes the element has the position clamped
    /// back into the canvas. Returns false when the id is unknown or nothing
    /// changed.
    pub fn update_element(&mut self, id: ElementId, patch: &ElementPatch) -> bool {
        let (canvas_w, canvas_h) = (self.width(), self.height());
        let Some(element) = self.element_store.get_mut(id) else {
            tracing::debug!("Ignoring update for missing element {}", id);
            return false;
        };

        let mut changed = element.apply_patch(patch);
        let geometry = [patch.x, patch.y, patch.width, patch.height];
        if geometry.iter().any(Option::is_some) {
            changed |= clamp_element(element, canvas_w, canvas_h);
        }
        changed
    }

    /// Removes the element; clears the selection if it was selected.
    pub fn delete_element(&mut self, id: ElementId) -> Option<Element> {
        let removed = self.element_store.remove(id)?;
        if self.selection_manager.is_selected(id) {
            self.selection_manager.clear();
        }
        if self.drag.as_ref().is_some_and(|d| d.element_id() == id) {
            self.drag = None;
        }
        tracing::debug!("Deleted element {}", id);
        Some(removed)
    }

    /// Copies the element with a fresh id, offset down and right, on top of
    /// the z-order, and selects the copy.
    pub fn duplicate_element(&mut self, id: ElementId) -> Option<ElementId> {
        let mut copy = self.element_store.get(id)?.clone();
        let new_id = self.element_store.generate_id();
        copy.id = new_id;
        copy.x += self.duplicate_offset();
        copy.y += self.duplicate_offset();
        clamp_element(&mut copy, self.width(), self.height());
        self.element_store.push(copy);
        self.selection_manager.set_selected_id(Some(new_id));
        tracing::debug!("Duplicated element {} as {}", id, new_id);
        Some(new_id)
    }

    /// Flips `hidden`. Returns the new value, or `None` if the id is unknown.
    pub fn toggle_visibility(&mut self, id: ElementId) -> Option<bool> {
        let element = self.element_store.get_mut(id)?;
        element.hidden = !element.hidden;
        Some(element.hidden)
    }

    /// Flips `locked`. Returns the new value, or `None` if the id is unknown.
    pub fn toggle_lock(&mut self, id: ElementId) -> Option<bool> {
        let element = self.element_store.get_mut(id)?;
        element.locked = !element.locked;
        if element.locked && self.drag.as_ref().is_some_and(|d| d.element_id() == id) {
            self.drag = None;
        }
        Some(element.locked)
    }

    /// Replaces the z-order. `order` must name exactly the current elements.
    pub fn reorder(&mut self, order: &[ElementId]) -> Result<(), DesignError> {
        self.element_store.reorder(order).inspect_err(|e| {
            tracing::warn!("{}", e);
        })
    }

    /// Replaces every element in one step and clears the selection.
    ///
    /// Incoming elements get fresh ids so nothing from the previous design
    /// can alias them.
    pub fn replace_elements(&mut self, elements: Vec<Element>) -> Vec<ElementId> {
        self.clear();
        let mut ids = Vec::with_capacity(elements.len());
        for mut element in elements {
            element.id = self.element_store.generate_id();
            ids.push(element.id);
            self.element_store.push(element);
        }
        ids
    }

    /// Replaces every element keeping the ids they were saved with.
    pub fn restore_elements(&mut self, mut elements: Vec<Element>) {
        self.clear();
        for element in &mut elements {
            element.normalize();
        }
        self.element_store.replace_all(elements);
        self.clamp_all();
    }
}
