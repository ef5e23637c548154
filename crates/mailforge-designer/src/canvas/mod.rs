//! Canvas holding the element model, selection, viewport and drag state.

mod interaction;
mod operations;
mod types;

pub use interaction::DragSession;
pub use types::{CanvasSize, PaintItem, PointerButton, PointerOutcome};

use mailforge_core::ElementId;

use crate::element_store::ElementStore;
use crate::model::{Element, Point};
use crate::selection_manager::SelectionManager;
use crate::viewport::Viewport;

/// Offset applied to both axes of a duplicated element.
pub const DEFAULT_DUPLICATE_OFFSET: f64 = 20.0;

/// Canvas state for one postcard design.
#[derive(Debug, Clone)]
pub struct Canvas {
    pub(crate) element_store: ElementStore,
    pub(crate) selection_manager: SelectionManager,
    viewport: Viewport,
    size: CanvasSize,
    show_grid: bool,
    duplicate_offset: f64,
    drag: Option<DragSession>,
}

impl Canvas {
    /// Creates an empty 4x6 canvas at 100% zoom.
    pub fn new() -> Self {
        Self::with_size(CanvasSize::default())
    }

    /// Creates an empty canvas of the given size.
    pub fn with_size(size: CanvasSize) -> Self {
        Self {
            element_store: ElementStore::new(),
            selection_manager: SelectionManager::new(),
            viewport: Viewport::new(),
            size,
            show_grid: true,
            duplicate_offset: DEFAULT_DUPLICATE_OFFSET,
            drag: None,
        }
    }

    pub fn size(&self) -> CanvasSize {
        self.size
    }

    pub fn width(&self) -> f64 {
        self.size.width()
    }

    pub fn height(&self) -> f64 {
        self.size.height()
    }

    /// Changes the postcard size. Element dimensions are kept; positions are
    /// clamped into the new bounds. Returns true if the size changed.
    pub fn set_size(&mut self, size: CanvasSize) -> bool {
        if self.size == size {
            return false;
        }
        self.size = size;
        self.clamp_all();
        tracing::debug!("Canvas size set to {}", size);
        true
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn zoom_percent(&self) -> u32 {
        self.viewport.zoom_percent()
    }

    pub fn show_grid(&self) -> bool {
        self.show_grid
    }

    pub fn set_show_grid(&mut self, show: bool) {
        self.show_grid = show;
    }

    pub fn duplicate_offset(&self) -> f64 {
        self.duplicate_offset
    }

    pub fn set_duplicate_offset(&mut self, offset: f64) {
        if offset.is_finite() {
            self.duplicate_offset = offset;
        }
    }

    /// Rendered size of the canvas surface in pixels at the current zoom.
    pub fn surface_size(&self) -> (f64, f64) {
        self.viewport.surface_size(self.size)
    }

    pub fn element_count(&self) -> usize {
        self.element_store.len()
    }

    pub fn elements(&self) -> &[Element] {
        self.element_store.as_slice()
    }

    /// Element ids in sequence order, bottom first.
    pub fn element_ids(&self) -> Vec<ElementId> {
        self.element_store.ids()
    }

    pub fn get_element(&self, id: ElementId) -> Option<&Element> {
        self.element_store.get(id)
    }

    pub fn selected_id(&self) -> Option<ElementId> {
        self.selection_manager.selected_id()
    }

    pub fn selected_element(&self) -> Option<&Element> {
        self.selected_id().and_then(|id| self.element_store.get(id))
    }

    /// Selects an existing element; unknown ids leave the selection alone.
    pub fn select(&mut self, id: ElementId) -> Option<ElementId> {
        self.selection_manager.select_id(&self.element_store, id)
    }

    pub fn deselect(&mut self) {
        self.selection_manager.clear();
    }

    /// Topmost visible element under a canvas-space point.
    pub fn hit_test(&self, point: Point) -> Option<ElementId> {
        SelectionManager::hit_test(&self.element_store, point)
    }

    /// Visible elements bottom to top, each flagged when selected.
    pub fn paint_list(&self) -> Vec<PaintItem> {
        self.element_store
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_visible())
            .map(|(z_index, e)| PaintItem {
                id: e.id,
                z_index,
                bounds: e.bounds(),
                opacity: e.opacity,
                selected: self.selection_manager.is_selected(e.id),
            })
            .collect()
    }

    /// Drops every element, the selection and any drag in progress.
    pub fn clear(&mut self) {
        self.element_store.clear();
        self.selection_manager.clear();
        self.drag = None;
    }

    fn clamp_all(&mut self) {
        let (w, h) = (self.width(), self.height());
        for element in self.element_store.iter_mut() {
            clamp_element(element, w, h);
        }
    }

    /// Top-left position for `(width, height)` clamped inside the canvas.
    pub fn clamp_position(&self, x: f64, y: f64, width: f64, height: f64) -> (f64, f64) {
        (
            clamp_axis(x, self.width(), width),
            clamp_axis(y, self.height(), height),
        )
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

/// Clamps a coordinate to `[0, extent - size]`; an element larger than the
/// canvas is pinned at 0.
pub(crate) fn clamp_axis(value: f64, extent: f64, size: f64) -> f64 {
    let max = (extent - size).max(0.0);
    value.clamp(0.0, max)
}

/// Pulls `element` back inside a `width` x `height` canvas. Returns true if
/// it moved.
pub(crate) fn clamp_element(element: &mut Element, width: f64, height: f64) -> bool {
    let x = clamp_axis(element.x, width, element.width);
    let y = clamp_axis(element.y, height, element.height);
    let moved = x != element.x || y != element.y;
    element.x = x;
    element.y = y;
    moved
}
