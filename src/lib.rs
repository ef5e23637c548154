//! # MailForge
//!
//! Design Studio for printed real-estate postcards: marketers place text,
//! images, shapes and merge tags on a fixed-size postcard canvas, start from
//! built-in templates, and save the result as a campaign.
//!
//! ## Architecture
//!
//! MailForge is organized as a workspace with multiple crates:
//!
//! 1. **mailforge-core** - Errors, identifiers, campaign status, event bus
//! 2. **mailforge-designer** - Element model, canvas, panels, templates, persistence adapter
//! 3. **mailforge-settings** - Configuration file, designer defaults, brand theme
//! 4. **mailforge** - Binary that wires settings, a session and a campaign store together

pub use mailforge_core as core;
pub use mailforge_designer as designer;
pub use mailforge_settings as settings;

pub use mailforge_core::{
    CampaignId, CampaignStatus, DesignError, DesignerEvent, ElementId, EventBus, EventCategory,
    EventFilter, Notification, NotificationLevel, OrderStatus, PersistenceError,
};

pub use mailforge_designer::{
    CampaignStore, Canvas, CanvasSize, DesignPersistence, DesignerOptions, DesignerState,
    Element, ElementPatch, ElementType, InMemoryCampaignStore, PersistedDesign, SaveOutcome,
    TemplateLibrary,
};

pub use mailforge_settings::{BrandTheme, Config, SettingsPersistence};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Console output with pretty formatting, filtered by `RUST_LOG`.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
