use std::collections::HashSet;

use mailforge_core::{DesignError, ElementId};

use crate::model::Element;

/// Ordered storage for design elements.
///
/// Sequence order is z-order: index 0 is painted first (bottom), the last
/// element is on top. Ids come from a monotonic counter and are never handed
/// out twice, even after the element they named is deleted.
#[derive(Debug, Clone)]
pub struct ElementStore {
    elements: Vec<Element>,
    next_id: u64,
}

impl ElementStore {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            next_id: 1,
        }
    }

    pub fn generate_id(&mut self) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        id
    }

    /// The id the next call to `generate_id` returns.
    pub fn peek_next_id(&self) -> ElementId {
        ElementId(self.next_id)
    }

    /// Appends on top of the z-order.
    pub fn push(&mut self, element: Element) {
        self.advance_past(element.id);
        self.elements.push(element);
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    pub fn position(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.position(id).is_some()
    }

    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        let index = self.position(id)?;
        Some(self.elements.remove(index))
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Element> {
        self.elements.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.elements.iter_mut()
    }

    pub fn as_slice(&self) -> &[Element] {
        &self.elements
    }

    pub fn ids(&self) -> Vec<ElementId> {
        self.elements.iter().map(|e| e.id).collect()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Replaces every element, keeping their ids. The id counter only moves
    /// forward.
    pub fn replace_all(&mut self, elements: Vec<Element>) {
        for element in &elements {
            self.advance_past(element.id);
        }
        self.elements = elements;
    }

    /// Replaces the ordering with `order`, which must name exactly the
    /// current element set.
    pub fn reorder(&mut self, order: &[ElementId]) -> Result<(), DesignError> {
        let expected = self.elements.len();
        let invalid = |reason: &str| DesignError::InvalidPermutation {
            expected,
            actual: order.len(),
            reason: reason.to_string(),
        };

        if order.len() != expected {
            return Err(invalid("length differs"));
        }
        let mut seen = HashSet::with_capacity(order.len());
        if !order.iter().all(|id| seen.insert(*id)) {
            return Err(invalid("duplicate id"));
        }
        if !order.iter().all(|id| self.contains(*id)) {
            return Err(invalid("unknown id"));
        }

        let mut remaining = std::mem::take(&mut self.elements);
        let mut reordered = Vec::with_capacity(expected);
        for id in order {
            if let Some(index) = remaining.iter().position(|e| e.id == *id) {
                reordered.push(remaining.swap_remove(index));
            }
        }
        self.elements = reordered;
        Ok(())
    }

    fn advance_past(&mut self, id: ElementId) {
        if id.0 >= self.next_id {
            self.next_id = id.0 + 1;
        }
    }
}

impl Default for ElementStore {
    fn default() -> Self {
        Self::new()
    }
}
