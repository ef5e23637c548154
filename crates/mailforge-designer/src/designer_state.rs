//! Designer state for one editing session.
//!
//! [`DesignerState`] owns the canvas, the session font registry and the undo
//! history, and publishes a [`DesignerEvent`] on the injected bus after every
//! change so the canvas view, layers list and properties panel re-render
//! from the same model.

use std::sync::Arc;

use mailforge_core::event_bus::{CanvasEvent, ElementEvent, PersistenceEvent};
use mailforge_core::{
    CampaignId, CampaignStatus, DesignError, DesignerEvent, ElementId, EventBus, EventFilter,
    Notification, PersistenceError, SubscriptionId,
};

use crate::canvas::{Canvas, CanvasSize, PointerButton, PointerOutcome, DEFAULT_DUPLICATE_OFFSET};
use crate::font_manager::FontRegistry;
use crate::history::{DesignSnapshot, History, DEFAULT_HISTORY_LIMIT};
use crate::layers::{self, LayerRow};
use crate::model::{ElementType, FontStyle, FontWeight, MergeTagDescriptor, Point, TextAlign};
use crate::patch::ElementPatch;
use crate::persistence::{CampaignRecord, DesignPersistence, SaveOutcome, DEFAULT_CAMPAIGN_NAME};
use crate::properties::{self, PropertiesView, PropertyField};
use crate::serialization::PersistedDesign;
use crate::templates::TemplateLibrary;
use crate::viewport::Viewport;

/// Session defaults, normally taken from the settings file.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignerOptions {
    pub canvas_size: CanvasSize,
    pub zoom_percent: u32,
    pub show_grid: bool,
    pub history_limit: usize,
    pub duplicate_offset: f64,
}

impl Default for DesignerOptions {
    fn default() -> Self {
        Self {
            canvas_size: CanvasSize::default(),
            zoom_percent: 100,
            show_grid: true,
            history_limit: DEFAULT_HISTORY_LIMIT,
            duplicate_offset: DEFAULT_DUPLICATE_OFFSET,
        }
    }
}

/// Designer state for UI integration
pub struct DesignerState {
    canvas: Canvas,
    pub design_name: String,
    pub is_modified: bool,
    fonts: FontRegistry,
    history: History,
    bus: Arc<EventBus>,
    subscriptions: Vec<SubscriptionId>,
    campaign_id: Option<CampaignId>,
    status: CampaignStatus,
    drag_before: Option<DesignSnapshot>,
}

impl DesignerState {
    /// Creates a blank session.
    pub fn new(options: DesignerOptions, bus: Arc<EventBus>) -> Self {
        let mut canvas = Canvas::with_size(options.canvas_size);
        *canvas.viewport_mut() = Viewport::with_zoom(options.zoom_percent);
        canvas.set_show_grid(options.show_grid);
        canvas.set_duplicate_offset(options.duplicate_offset);

        Self {
            canvas,
            design_name: DEFAULT_CAMPAIGN_NAME.to_string(),
            is_modified: false,
            fonts: FontRegistry::new(),
            history: History::new(options.history_limit),
            bus,
            subscriptions: Vec::new(),
            campaign_id: None,
            status: CampaignStatus::Draft,
            drag_before: None,
        }
    }

    /// Opens a stored campaign. Elements keep their saved ids.
    pub fn from_record(
        record: CampaignRecord,
        options: DesignerOptions,
        bus: Arc<EventBus>,
    ) -> Result<Self, PersistenceError> {
        let restored = record.design.to_canvas()?;
        let mut state = Self::new(options, bus);
        state.canvas = {
            let mut canvas = restored;
            *canvas.viewport_mut() = state.canvas.viewport().clone();
            canvas.set_show_grid(state.canvas.show_grid());
            canvas.set_duplicate_offset(state.canvas.duplicate_offset());
            canvas
        };
        state.design_name = record.name;
        state.status = record.design.status;
        state.emit(DesignerEvent::Element(ElementEvent::Replaced {
            count: state.canvas.element_count(),
        }));
        state.emit(DesignerEvent::Persistence(PersistenceEvent::Loaded(
            record.id.clone(),
        )));
        state.campaign_id = Some(record.id);
        Ok(state)
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    pub fn campaign_id(&self) -> Option<&CampaignId> {
        self.campaign_id.as_ref()
    }

    pub fn status(&self) -> CampaignStatus {
        self.status
    }

    pub fn fonts(&self) -> &FontRegistry {
        &self.fonts
    }

    fn emit(&self, event: DesignerEvent) {
        // nobody listening is fine
        let _ = self.bus.publish(event);
    }

    fn notify(&self, notification: Notification) {
        self.emit(DesignerEvent::Notify(notification));
    }

    /// Registers a listener that lives until the session ends.
    pub fn subscribe<F>(&mut self, filter: EventFilter, handler: F) -> SubscriptionId
    where
        F: Fn(DesignerEvent) + Send + Sync + 'static,
    {
        let id = self.bus.subscribe(filter, handler);
        self.subscriptions.push(id);
        id
    }

    /// Records `before` as an undo step and publishes `event` when `changed`.
    fn commit(&mut self, before: DesignSnapshot, changed: bool, event: DesignerEvent) {
        if !changed {
            return;
        }
        let selection_before = before.selected;
        self.history.record(before);
        self.is_modified = true;
        self.emit(event);
        self.emit_selection_if_changed(selection_before);
    }

    fn emit_selection_if_changed(&self, before: Option<ElementId>) {
        let after = self.canvas.selected_id();
        if after != before {
            self.emit(DesignerEvent::Selection(after));
        }
    }

    // ---- element model ----

    pub fn add_element(&mut self, ty: ElementType) -> ElementId {
        let before = self.canvas.snapshot();
        let id = self.canvas.add_element(ty);
        self.commit(before, true, DesignerEvent::Element(ElementEvent::Added(id)));
        id
    }

    pub fn add_merge_tag(&mut self, descriptor: &MergeTagDescriptor) -> ElementId {
        let before = self.canvas.snapshot();
        let id = self.canvas.add_merge_tag(descriptor);
        self.commit(before, true, DesignerEvent::Element(ElementEvent::Added(id)));
        id
    }

    /// Inserts a generated headline. Producing the text is up to the caller.
    pub fn add_headline(&mut self, text: &str) -> ElementId {
        let before = self.canvas.snapshot();
        let id = self.canvas.add_headline(text);
        self.commit(before, true, DesignerEvent::Element(ElementEvent::Added(id)));
        id
    }

    pub fn update_element(&mut self, id: ElementId, patch: &ElementPatch) -> bool {
        let before = self.canvas.snapshot();
        let changed = self.canvas.update_element(id, patch);
        self.commit(before, changed, DesignerEvent::Element(ElementEvent::Updated(id)));
        changed
    }

    pub fn delete_element(&mut self, id: ElementId) -> bool {
        let before = self.canvas.snapshot();
        let removed = self.canvas.delete_element(id).is_some();
        self.commit(before, removed, DesignerEvent::Element(ElementEvent::Removed(id)));
        removed
    }

    pub fn delete_selected(&mut self) -> bool {
        match self.canvas.selected_id() {
            Some(id) => self.delete_element(id),
            None => false,
        }
    }

    pub fn duplicate_element(&mut self, id: ElementId) -> Option<ElementId> {
        let before = self.canvas.snapshot();
        let new_id = self.canvas.duplicate_element(id);
        if let Some(new_id) = new_id {
            self.commit(before, true, DesignerEvent::Element(ElementEvent::Added(new_id)));
        }
        new_id
    }

    pub fn toggle_visibility(&mut self, id: ElementId) -> Option<bool> {
        let before = self.canvas.snapshot();
        let hidden = self.canvas.toggle_visibility(id);
        self.commit(
            before,
            hidden.is_some(),
            DesignerEvent::Element(ElementEvent::Updated(id)),
        );
        hidden
    }

    pub fn toggle_lock(&mut self, id: ElementId) -> Option<bool> {
        let before = self.canvas.snapshot();
        let locked = self.canvas.toggle_lock(id);
        self.commit(
            before,
            locked.is_some(),
            DesignerEvent::Element(ElementEvent::Updated(id)),
        );
        locked
    }

    pub fn reorder(&mut self, order: &[ElementId]) -> Result<(), DesignError> {
        let before = self.canvas.snapshot();
        self.canvas.reorder(order)?;
        let changed = before.elements.iter().map(|e| e.id).ne(order.iter().copied());
        self.commit(before, changed, DesignerEvent::Element(ElementEvent::Reordered));
        Ok(())
    }

    // ---- selection and pointer ----

    pub fn select(&mut self, id: ElementId) -> Option<ElementId> {
        let before = self.canvas.selected_id();
        let selected = self.canvas.select(id);
        self.emit_selection_if_changed(before);
        selected
    }

    pub fn deselect(&mut self) {
        let before = self.canvas.selected_id();
        self.canvas.deselect();
        self.emit_selection_if_changed(before);
    }

    pub fn pointer_down(
        &mut self,
        target: Option<ElementId>,
        button: PointerButton,
        position: Point,
    ) -> PointerOutcome {
        let selected_before = self.canvas.selected_id();
        let snapshot = self.canvas.snapshot();
        let outcome = self.canvas.pointer_down(target, button, position);
        self.drag_before = matches!(outcome, PointerOutcome::DragStarted(_)).then_some(snapshot);
        self.emit_selection_if_changed(selected_before);
        outcome
    }

    pub fn press_at(&mut self, button: PointerButton, position: Point) -> PointerOutcome {
        let point = self.canvas.viewport().screen_to_canvas(position.x, position.y);
        let target = self.canvas.hit_test(point);
        self.pointer_down(target, button, position)
    }

    pub fn pointer_move(&mut self, position: Point) -> bool {
        let moved = self.canvas.pointer_move(position);
        if moved {
            if let Some(session) = self.canvas.drag_session() {
                self.emit(DesignerEvent::Element(ElementEvent::Updated(
                    session.element_id(),
                )));
            }
        }
        moved
    }

    /// Ends a drag. A drag that moved the element is one undo step.
    pub fn pointer_up(&mut self) {
        let session = self.canvas.pointer_up();
        let before = self.drag_before.take();
        if let (Some(session), Some(before)) = (session, before) {
            if session.has_moved() {
                self.history.record(before);
                self.is_modified = true;
            }
        }
    }

    // ---- view ----

    /// Steps the zoom up. Returns false at the 200% limit.
    pub fn zoom_in(&mut self) -> bool {
        let changed = self.canvas.viewport_mut().zoom_in();
        self.emit_zoom(changed)
    }

    /// Steps the zoom down. Returns false at the 50% limit.
    pub fn zoom_out(&mut self) -> bool {
        let changed = self.canvas.viewport_mut().zoom_out();
        self.emit_zoom(changed)
    }

    pub fn set_zoom(&mut self, percent: u32) -> bool {
        let changed = self.canvas.viewport_mut().set_zoom_percent(percent);
        self.emit_zoom(changed)
    }

    fn emit_zoom(&self, changed: bool) -> bool {
        if changed {
            self.emit(DesignerEvent::Canvas(CanvasEvent::ZoomChanged(
                self.canvas.zoom_percent(),
            )));
        }
        changed
    }

    pub fn set_show_grid(&mut self, show: bool) {
        self.canvas.set_show_grid(show);
        self.emit(DesignerEvent::Canvas(CanvasEvent::GridToggled(show)));
    }

    pub fn set_canvas_size(&mut self, size: CanvasSize) -> bool {
        let before = self.canvas.snapshot();
        let changed = self.canvas.set_size(size);
        self.commit(
            before,
            changed,
            DesignerEvent::Canvas(CanvasEvent::SizeChanged(size.key().to_string())),
        );
        changed
    }

    // ---- properties panel ----

    pub fn properties(&self) -> PropertiesView {
        PropertiesView::build(&self.canvas)
    }

    pub fn apply_property(&mut self, field: PropertyField, raw: &str) -> Result<bool, DesignError> {
        let before = self.canvas.snapshot();
        let changed = properties::apply_input(&mut self.canvas, field, raw)?;
        self.commit_selected(before, changed);
        Ok(changed)
    }

    pub fn toggle_bold(&mut self) -> Result<FontWeight, DesignError> {
        let before = self.canvas.snapshot();
        let weight = properties::toggle_bold(&mut self.canvas)?;
        self.commit_selected(before, true);
        Ok(weight)
    }

    pub fn toggle_italic(&mut self) -> Result<FontStyle, DesignError> {
        let before = self.canvas.snapshot();
        let style = properties::toggle_italic(&mut self.canvas)?;
        self.commit_selected(before, true);
        Ok(style)
    }

    pub fn set_text_align(&mut self, align: TextAlign) -> Result<bool, DesignError> {
        let before = self.canvas.snapshot();
        let changed = properties::set_text_align(&mut self.canvas, align)?;
        self.commit_selected(before, changed);
        Ok(changed)
    }

    pub fn set_fill_type(&mut self, gradient: bool) -> Result<bool, DesignError> {
        let before = self.canvas.snapshot();
        let changed = properties::set_fill_type(&mut self.canvas, gradient)?;
        self.commit_selected(before, changed);
        Ok(changed)
    }

    fn commit_selected(&mut self, before: DesignSnapshot, changed: bool) {
        if let Some(id) = self.canvas.selected_id() {
            self.commit(before, changed, DesignerEvent::Element(ElementEvent::Updated(id)));
        }
    }

    /// Adds an uploaded font to this session's font list.
    pub fn register_font(
        &mut self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, DesignError> {
        match self.fonts.register(file_name, bytes) {
            Ok(family) => {
                self.notify(Notification::success(format!("Font \"{}\" added", family)));
                Ok(family)
            }
            Err(e) => {
                self.notify(Notification::from_error("Font upload failed", &e));
                Err(e)
            }
        }
    }

    pub fn font_options(&self) -> Vec<String> {
        self.fonts.font_options()
    }

    // ---- layers panel ----

    pub fn layer_rows(&self) -> Vec<LayerRow> {
        layers::rows(&self.canvas)
    }

    pub fn move_layer(&mut self, from: usize, to: usize) -> Result<bool, DesignError> {
        let before = self.canvas.snapshot();
        let moved = layers::move_row(&mut self.canvas, from, to)?;
        self.commit(before, moved, DesignerEvent::Element(ElementEvent::Reordered));
        Ok(moved)
    }

    // ---- templates ----

    /// Replaces the design with a catalog template.
    pub fn load_template(
        &mut self,
        library: &TemplateLibrary,
        id: &str,
    ) -> Result<(), DesignError> {
        let before = self.canvas.snapshot();
        let size_before = self.canvas.size();
        let ids = library.load_into(id, &mut self.canvas).inspect_err(|e| {
            tracing::warn!("{}", e);
        })?;
        let size = self.canvas.size();
        self.commit(
            before,
            true,
            DesignerEvent::Element(ElementEvent::Replaced { count: ids.len() }),
        );
        if size != size_before {
            self.emit(DesignerEvent::Canvas(CanvasEvent::SizeChanged(
                size.key().to_string(),
            )));
        }
        Ok(())
    }

    // ---- history ----

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo(&mut self) -> bool {
        self.finish_drag();
        let current = self.canvas.snapshot();
        let Some(previous) = self.history.undo(current) else {
            return false;
        };
        self.restore(previous);
        true
    }

    pub fn redo(&mut self) -> bool {
        self.finish_drag();
        let current = self.canvas.snapshot();
        let Some(next) = self.history.redo(current) else {
            return false;
        };
        self.restore(next);
        true
    }

    fn finish_drag(&mut self) {
        if self.canvas.is_dragging() {
            self.pointer_up();
        }
    }

    fn restore(&mut self, snapshot: DesignSnapshot) {
        let selected_before = self.canvas.selected_id();
        self.canvas.restore_snapshot(snapshot);
        self.is_modified = true;
        self.emit(DesignerEvent::Element(ElementEvent::Replaced {
            count: self.canvas.element_count(),
        }));
        self.emit_selection_if_changed(selected_before);
    }

    // ---- persistence ----

    pub fn persisted_design(&self) -> PersistedDesign {
        PersistedDesign::from_canvas(&self.canvas, self.status)
    }

    /// Saves through `persistence`. Failures are also published as an error
    /// notification.
    pub async fn save(
        &mut self,
        persistence: &DesignPersistence,
    ) -> Result<SaveOutcome, PersistenceError> {
        let design = self.persisted_design();
        self.emit(DesignerEvent::Persistence(PersistenceEvent::SaveStarted));

        match persistence.save(self.campaign_id.as_ref(), design).await {
            Ok(SaveOutcome::Suppressed) => Ok(SaveOutcome::Suppressed),
            Ok(outcome) => {
                if let Some(id) = outcome.campaign_id() {
                    if matches!(outcome, SaveOutcome::Created(_)) {
                        self.status = CampaignStatus::Designing;
                    }
                    self.campaign_id = Some(id.clone());
                    self.emit(DesignerEvent::Persistence(PersistenceEvent::Saved(id.clone())));
                }
                self.is_modified = false;
                self.notify(Notification::success("Design saved"));
                Ok(outcome)
            }
            Err(e) => {
                tracing::warn!("Save failed: {}", e);
                self.emit(DesignerEvent::Persistence(PersistenceEvent::SaveFailed(
                    e.to_string(),
                )));
                self.notify(Notification::from_error("Failed to save design", &e));
                Err(e)
            }
        }
    }

    // ---- lifecycle ----

    /// Tears the session down: drops uploaded fonts, unsubscribes every
    /// listener registered through this state and ends any drag.
    pub fn end_session(&mut self) {
        self.canvas.pointer_up();
        self.drag_before = None;
        self.fonts.clear();
        for id in self.subscriptions.drain(..) {
            self.bus.unsubscribe(id);
        }
        tracing::debug!("Designer session ended");
    }
}

impl Drop for DesignerState {
    fn drop(&mut self) {
        for id in self.subscriptions.drain(..) {
            self.bus.unsubscribe(id);
        }
    }
}

impl std::fmt::Debug for DesignerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DesignerState")
            .field("design_name", &self.design_name)
            .field("campaign_id", &self.campaign_id)
            .field("elements", &self.canvas.element_count())
            .field("is_modified", &self.is_modified)
            .finish()
    }
}
