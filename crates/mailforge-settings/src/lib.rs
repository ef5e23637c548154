//! MailForge Settings Crate
//!
//! Handles the configuration file: designer session defaults and the brand
//! theme used by the application shell.

pub mod branding;
pub mod config;
pub mod error;
pub mod persistence;

pub use branding::BrandTheme;
pub use config::{Config, DesignerSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
pub use persistence::SettingsPersistence;
