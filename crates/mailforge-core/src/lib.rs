//! # MailForge Core
//!
//! Core types, traits, and utilities shared by the MailForge crates.
//! Provides the error hierarchy, element identifiers, campaign/order status
//! enums, user-facing notifications, and the editor event bus.

pub mod error;
pub mod event_bus;
pub mod ids;
pub mod notification;
pub mod status;

pub use error::{DesignError, PersistenceError};
pub use event_bus::{
    DesignerEvent, EventBus, EventBusError, EventCategory, EventFilter, SubscriptionId,
};
pub use ids::{CampaignId, ElementId};
pub use notification::{Notification, NotificationLevel};
pub use status::{CampaignStatus, OrderStatus};
