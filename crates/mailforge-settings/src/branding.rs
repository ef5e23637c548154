//! Brand theme: the color palette and surface styling of the shell.
//!
//! The theme is loaded with the rest of the configuration and handed to
//! whoever renders; [`BrandTheme::css_variables`] turns it into the
//! `--brand-*` custom properties the stylesheet reads.

use serde::{Deserialize, Serialize};

use crate::error::{SettingsError, SettingsResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandTheme {
    pub app_name: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub background_color: String,
    pub text_color: String,
    /// Corner radius of cards and panels, in px.
    pub border_radius: u32,
    /// Backdrop blur of glass panels, in px.
    pub glass_blur: u32,
    pub font_family: String,
}

impl Default for BrandTheme {
    fn default() -> Self {
        Self {
            app_name: "MailForge".to_string(),
            primary_color: "#0F172A".to_string(),
            secondary_color: "#3B82F6".to_string(),
            accent_color: "#10B981".to_string(),
            background_color: "#F8FAFC".to_string(),
            text_color: "#1E293B".to_string(),
            border_radius: 12,
            glass_blur: 10,
            font_family: "Inter".to_string(),
        }
    }
}

/// True for `#rgb` and `#rrggbb`.
pub fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => {
            (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

impl BrandTheme {
    fn colors(&self) -> [(&'static str, &str); 5] {
        [
            ("primary", &self.primary_color),
            ("secondary", &self.secondary_color),
            ("accent", &self.accent_color),
            ("background", &self.background_color),
            ("text", &self.text_color),
        ]
    }

    pub fn validate(&self) -> SettingsResult<()> {
        if self.app_name.trim().is_empty() {
            return Err(SettingsError::invalid("branding.app_name", "must not be empty"));
        }
        for (name, value) in self.colors() {
            if !is_hex_color(value) {
                return Err(SettingsError::invalid(
                    format!("branding.{}_color", name),
                    format!("{:?} is not a hex color", value),
                ));
            }
        }
        if self.font_family.trim().is_empty() {
            return Err(SettingsError::invalid("branding.font_family", "must not be empty"));
        }
        Ok(())
    }

    /// CSS custom properties, in declaration order.
    pub fn css_variables(&self) -> Vec<(String, String)> {
        let mut vars: Vec<(String, String)> = self
            .colors()
            .iter()
            .map(|(name, value)| (format!("--brand-{}", name), value.to_string()))
            .collect();
        vars.push(("--brand-radius".to_string(), format!("{}px", self.border_radius)));
        vars.push(("--brand-blur".to_string(), format!("{}px", self.glass_blur)));
        vars.push(("--brand-font".to_string(), format!("'{}', sans-serif", self.font_family)));
        vars
    }

    /// A `:root { ... }` block declaring every variable.
    pub fn to_css_root(&self) -> String {
        let mut css = String::from(":root {\n");
        for (name, value) in self.css_variables() {
            css.push_str(&format!("  {}: {};\n", name, value));
        }
        css.push('}');
        css
    }
}
