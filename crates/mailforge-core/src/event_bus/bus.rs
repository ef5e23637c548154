//! Event bus implementation.

use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

use super::events::{DesignerEvent, EventCategory};

/// Handle returned by [`EventBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

/// Which events a listener wants
#[derive(Debug, Clone, Default)]
pub enum EventFilter {
    #[default]
    All,
    /// Events in any of these categories.
    Categories(Vec<EventCategory>),
}

impl EventFilter {
    pub fn matches(&self, event: &DesignerEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Categories(categories) => categories.contains(&event.category()),
        }
    }
}

type EventHandler = Box<dyn Fn(DesignerEvent) + Send + Sync>;

#[derive(Debug, Clone, thiserror::Error)]
pub enum EventBusError {
    #[error("No active subscribers")]
    NoSubscribers,
}

/// Synchronous publish/subscribe channel for one editor session.
///
/// Handlers run on the publishing thread, in no particular order.
#[derive(Default)]
pub struct EventBus {
    handlers: RwLock<HashMap<SubscriptionId, (EventFilter, EventHandler)>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers `event` to every matching handler and returns how many ran.
    ///
    /// Fails only when nobody is subscribed at all.
    pub fn publish(&self, event: DesignerEvent) -> Result<usize, EventBusError> {
        tracing::trace!("event: {}", event.description());

        let handlers = self.handlers.read();
        if handlers.is_empty() {
            return Err(EventBusError::NoSubscribers);
        }

        let mut delivered = 0;
        for (filter, handler) in handlers.values() {
            if filter.matches(&event) {
                handler(event.clone());
                delivered += 1;
            }
        }
        Ok(delivered)
    }

    /// Registers `handler` for events matching `filter`.
    ///
    /// The handler must not subscribe or unsubscribe from inside the callback.
    pub fn subscribe<F>(&self, filter: EventFilter, handler: F) -> SubscriptionId
    where
        F: Fn(DesignerEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId::new();
        self.handlers.write().insert(id, (filter, Box::new(handler)));
        tracing::debug!("Subscription {} added", id);
        id
    }

    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = self.handlers.write().remove(&id).is_some();
        if removed {
            tracing::debug!("Subscription {} removed", id);
        }
        removed
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.read().len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_bus::events::{CanvasEvent, ElementEvent};
    use crate::ids::ElementId;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_subscribe_and_unsubscribe() {
        let bus = EventBus::new();

        let id = bus.subscribe(EventFilter::All, |_| {});
        assert_eq!(bus.subscriber_count(), 1);

        assert!(bus.unsubscribe(id));
        assert_eq!(bus.subscriber_count(), 0);

        // second unsubscribe finds nothing
        assert!(!bus.unsubscribe(id));
    }

    #[test]
    fn test_publish_without_listeners() {
        let bus = EventBus::new();
        let result = bus.publish(DesignerEvent::Selection(None));
        assert!(matches!(result, Err(EventBusError::NoSubscribers)));
    }

    #[test]
    fn test_event_filtering() {
        let bus = EventBus::new();
        let element_count = Arc::new(AtomicUsize::new(0));
        let canvas_count = Arc::new(AtomicUsize::new(0));

        let ec = element_count.clone();
        bus.subscribe(
            EventFilter::Categories(vec![EventCategory::Element]),
            move |_| {
                ec.fetch_add(1, Ordering::SeqCst);
            },
        );

        let cc = canvas_count.clone();
        bus.subscribe(
            EventFilter::Categories(vec![EventCategory::Canvas]),
            move |_| {
                cc.fetch_add(1, Ordering::SeqCst);
            },
        );

        let delivered = bus
            .publish(DesignerEvent::Element(ElementEvent::Added(ElementId(1))))
            .unwrap();
        assert_eq!(delivered, 1);
        bus.publish(DesignerEvent::Element(ElementEvent::Reordered)).ok();
        bus.publish(DesignerEvent::Canvas(CanvasEvent::ZoomChanged(110)))
            .ok();

        // a subscribed bus with no matching handler is not an error
        assert_eq!(bus.publish(DesignerEvent::Selection(None)).unwrap(), 0);

        assert_eq!(element_count.load(Ordering::SeqCst), 2);
        assert_eq!(canvas_count.load(Ordering::SeqCst), 1);
    }
}
