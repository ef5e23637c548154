//! Configuration file handling for MailForge
//!
//! Configuration is organized into two sections:
//! - Designer defaults (postcard size, zoom, grid, undo depth)
//! - Branding (palette and surface styling of the shell)
//!
//! Files are JSON or TOML, chosen by extension. Missing keys fall back to
//! their defaults; present keys are validated on load and on save.

use std::path::Path;

use serde::{Deserialize, Serialize};

use mailforge_designer::viewport::{MAX_ZOOM_PERCENT, MIN_ZOOM_PERCENT};
use mailforge_designer::{CanvasSize, DesignerOptions};

use crate::branding::BrandTheme;
use crate::error::{ConfigError, SettingsError, SettingsResult};

/// Largest accepted undo depth.
pub const MAX_HISTORY_LIMIT: usize = 500;

/// Defaults applied to every new editor session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignerSettings {
    pub default_canvas_size: CanvasSize,
    /// Initial zoom in percent
    pub default_zoom: u32,
    pub show_grid: bool,
    /// Undo steps kept per session
    pub history_limit: usize,
    /// Offset applied to both axes when duplicating
    pub duplicate_offset: f64,
}

impl Default for DesignerSettings {
    fn default() -> Self {
        let options = DesignerOptions::default();
        Self {
            default_canvas_size: options.canvas_size,
            default_zoom: options.zoom_percent,
            show_grid: options.show_grid,
            history_limit: options.history_limit,
            duplicate_offset: options.duplicate_offset,
        }
    }
}

impl DesignerSettings {
    pub fn to_options(&self) -> DesignerOptions {
        DesignerOptions {
            canvas_size: self.default_canvas_size,
            zoom_percent: self.default_zoom,
            show_grid: self.show_grid,
            history_limit: self.history_limit,
            duplicate_offset: self.duplicate_offset,
        }
    }

    pub fn validate(&self) -> SettingsResult<()> {
        if !(MIN_ZOOM_PERCENT..=MAX_ZOOM_PERCENT).contains(&self.default_zoom) {
            return Err(SettingsError::invalid(
                "designer.default_zoom",
                format!("must be between {} and {}", MIN_ZOOM_PERCENT, MAX_ZOOM_PERCENT),
            ));
        }
        if self.history_limit == 0 || self.history_limit > MAX_HISTORY_LIMIT {
            return Err(SettingsError::invalid(
                "designer.history_limit",
                format!("must be between 1 and {}", MAX_HISTORY_LIMIT),
            ));
        }
        if !self.duplicate_offset.is_finite() || self.duplicate_offset < 0.0 {
            return Err(SettingsError::invalid(
                "designer.duplicate_offset",
                "must be a non-negative number",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub designer: DesignerSettings,
    pub branding: BrandTheme,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::from_path(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;
        tracing::debug!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> SettingsResult<()> {
        self.designer.validate()?;
        self.branding.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_session_defaults() {
        let config = Config::default();
        assert_eq!(config.designer.to_options(), DesignerOptions::default());
        assert_eq!(config.designer.default_canvas_size, CanvasSize::FourBySix);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zoom_out_of_range() {
        let mut config = Config::default();
        config.designer.default_zoom = 250;
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            SettingsError::InvalidSetting { ref key, .. } if key == "designer.default_zoom"
        ));
    }

    #[test]
    fn test_history_limit_bounds() {
        let mut settings = DesignerSettings::default();
        settings.history_limit = 0;
        assert!(settings.validate().is_err());
        settings.history_limit = MAX_HISTORY_LIMIT;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [designer]
            default_canvas_size = "6x11"
            "#,
        )
        .unwrap();
        assert_eq!(config.designer.default_canvas_size, CanvasSize::SixByEleven);
        assert_eq!(config.designer.default_zoom, 100);
        assert_eq!(config.branding, BrandTheme::default());
    }

    #[test]
    fn test_unsupported_extension() {
        let err = Config::load_from_file(Path::new("settings.yaml")).unwrap_err();
        assert!(matches!(err, SettingsError::Config(ConfigError::UnsupportedFormat(_))));
    }
}
