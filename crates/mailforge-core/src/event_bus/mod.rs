//! # Event Bus Module
//!
//! Publish/subscribe channel between the element model and the views that
//! render it. A bus is created per editor session and handed to the
//! components that need it; there is no process-wide instance.
//!
//! ## Usage
//!
//! ```rust
//! use mailforge_core::event_bus::{DesignerEvent, EventBus, EventCategory, EventFilter};
//!
//! let bus = EventBus::new();
//! let subscription = bus.subscribe(
//!     EventFilter::Categories(vec![EventCategory::Selection]),
//!     |event| {
//!         if let DesignerEvent::Selection(id) = event {
//!             println!("selection: {:?}", id);
//!         }
//!     },
//! );
//!
//! bus.publish(DesignerEvent::Selection(None)).ok();
//! bus.unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
