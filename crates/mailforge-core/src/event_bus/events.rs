//! Event type definitions for the event bus.
//!
//! Every mutation of the element model publishes one of these so that the
//! canvas, layers list and properties panel re-render from the same state.

use serde::{Deserialize, Serialize};

use crate::ids::{CampaignId, ElementId};
use crate::notification::Notification;

/// Root event enum for all editor events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DesignerEvent {
    /// Element created, changed or removed
    Element(ElementEvent),
    /// Selection changed
    Selection(Option<ElementId>),
    /// Canvas view or size changed
    Canvas(CanvasEvent),
    /// Persistence lifecycle
    Persistence(PersistenceEvent),
    /// Message for the user
    Notify(Notification),
}

/// Element model changes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ElementEvent {
    Added(ElementId),
    Updated(ElementId),
    Removed(ElementId),
    Reordered,
    /// The whole model was replaced (template or design load)
    Replaced { count: usize },
}

/// Canvas view changes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CanvasEvent {
    ZoomChanged(u32),
    SizeChanged(String),
    GridToggled(bool),
}

/// Save/load lifecycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PersistenceEvent {
    SaveStarted,
    Saved(CampaignId),
    SaveFailed(String),
    Loaded(CampaignId),
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    Element,
    Selection,
    Canvas,
    Persistence,
    Notify,
}

impl DesignerEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            DesignerEvent::Element(_) => EventCategory::Element,
            DesignerEvent::Selection(_) => EventCategory::Selection,
            DesignerEvent::Canvas(_) => EventCategory::Canvas,
            DesignerEvent::Persistence(_) => EventCategory::Persistence,
            DesignerEvent::Notify(_) => EventCategory::Notify,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            DesignerEvent::Element(ElementEvent::Added(id)) => format!("element {} added", id),
            DesignerEvent::Element(ElementEvent::Updated(id)) => format!("element {} updated", id),
            DesignerEvent::Element(ElementEvent::Removed(id)) => format!("element {} removed", id),
            DesignerEvent::Element(ElementEvent::Reordered) => "elements reordered".to_string(),
            DesignerEvent::Element(ElementEvent::Replaced { count }) => {
                format!("model replaced with {} elements", count)
            }
            DesignerEvent::Selection(Some(id)) => format!("selected {}", id),
            DesignerEvent::Selection(None) => "selection cleared".to_string(),
            DesignerEvent::Canvas(CanvasEvent::ZoomChanged(z)) => format!("zoom {}%", z),
            DesignerEvent::Canvas(CanvasEvent::SizeChanged(s)) => format!("canvas size {}", s),
            DesignerEvent::Canvas(CanvasEvent::GridToggled(on)) => format!("grid {}", on),
            DesignerEvent::Persistence(PersistenceEvent::SaveStarted) => "save started".to_string(),
            DesignerEvent::Persistence(PersistenceEvent::Saved(id)) => format!("saved {}", id),
            DesignerEvent::Persistence(PersistenceEvent::SaveFailed(e)) => {
                format!("save failed: {}", e)
            }
            DesignerEvent::Persistence(PersistenceEvent::Loaded(id)) => format!("loaded {}", id),
            DesignerEvent::Notify(n) => n.to_string(),
        }
    }
}
