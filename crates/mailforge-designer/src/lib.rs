//! # MailForge Designer
//!
//! Editing core of the postcard Design Studio: a flat list of visual
//! elements on a fixed-size canvas, with the panels and adapters that read
//! and change it.
//!
//! ## Core Components
//!
//! - **Model**: text, image, rectangle, circle and merge-tag elements
//! - **Canvas**: element store, single selection, bounds-clamped dragging
//! - **Viewport**: zoom from 50% to 200%
//! - **Properties**: type-driven field set with validated numeric input
//! - **Layers**: topmost-first listing and row reordering
//! - **Templates**: built-in catalog filtered by category and postcard size
//! - **Fonts**: session-scoped registry of uploaded font files
//! - **Persistence**: campaign record serialization and the store adapter
//! - **History**: snapshot undo/redo
//!
//! ## Architecture
//!
//! ```text
//! DesignerState (session)
//!   ├── Canvas
//!   │     ├── ElementStore (sequence order = z-order)
//!   │     ├── SelectionManager
//!   │     └── Viewport
//!   ├── FontRegistry
//!   ├── History
//!   └── EventBus handle
//!
//! DesignPersistence ── CampaignStore (remote)
//! ```
//!
//! Every change to an element, from a drag or a panel, goes through
//! [`Canvas::update_element`].
//!
//! ## Usage
//!
//! ```rust
//! use mailforge_designer::{Canvas, ElementPatch, ElementType};
//!
//! let mut canvas = Canvas::new();
//! let id = canvas.add_element(ElementType::Rectangle);
//! canvas.update_element(id, &ElementPatch::position(1000.0, 20.0));
//!
//! let rect = canvas.get_element(id).unwrap();
//! assert_eq!((rect.x, rect.y), (500.0, 20.0));
//! ```

pub mod canvas;
pub mod designer_state;
pub mod element_store;
pub mod font_manager;
pub mod history;
pub mod layers;
pub mod model;
pub mod patch;
pub mod persistence;
pub mod properties;
pub mod selection_manager;
pub mod serialization;
pub mod templates;
pub mod viewport;

pub use canvas::{Canvas, CanvasSize, DragSession, PaintItem, PointerButton, PointerOutcome};
pub use designer_state::{DesignerOptions, DesignerState};
pub use element_store::ElementStore;
pub use font_manager::{FontRegistry, BUILTIN_FONTS};
pub use history::{DesignSnapshot, History};
pub use layers::LayerRow;
pub use model::{
    Bounds, Element, ElementKind, ElementType, Fill, GradientDirection, MergeTagDescriptor,
    Point, MERGE_TAGS,
};
pub use patch::ElementPatch;
pub use persistence::{
    CampaignRecord, CampaignStore, DesignPersistence, InMemoryCampaignStore, SaveOutcome,
};
pub use properties::{PropertiesView, PropertyField, PropertyValue};
pub use selection_manager::SelectionManager;
pub use serialization::{DesignData, MergeTagPlacement, PersistedDesign};
pub use templates::{CategoryFilter, PostcardTemplate, TemplateCategory, TemplateLibrary};
pub use viewport::Viewport;
