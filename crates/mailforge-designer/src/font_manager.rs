//! Session-scoped font registry.
//!
//! Fonts uploaded in the properties panel live only as long as the editor
//! session that owns the registry. Faces are parsed with `fontdb` to learn
//! their family name.

use std::path::Path;

use fontdb::Database;
use mailforge_core::DesignError;

/// Families always offered in the font picker.
pub const BUILTIN_FONTS: [&str; 5] = [
    "Inter",
    "Arial",
    "Georgia",
    "Times New Roman",
    "Courier New",
];

const ACCEPTED_EXTENSIONS: [&str; 4] = ["ttf", "otf", "woff", "woff2"];

/// Web font containers fontdb cannot parse; their family name comes from the
/// file name.
const WEB_FONT_EXTENSIONS: [&str; 2] = ["woff", "woff2"];

pub struct FontRegistry {
    db: Database,
    custom: Vec<String>,
}

impl FontRegistry {
    pub fn new() -> Self {
        Self {
            db: Database::new(),
            custom: Vec::new(),
        }
    }

    /// Registers an uploaded font file and returns the family name it is
    /// offered under.
    pub fn register(&mut self, file_name: &str, bytes: Vec<u8>) -> Result<String, DesignError> {
        let path = Path::new(file_name);
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::trim)
            .unwrap_or_default()
            .to_string();

        let reject = |reason: &str| DesignError::FontLoad {
            name: file_name.to_string(),
            reason: reason.to_string(),
        };

        if !ACCEPTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(reject("expected a .ttf, .otf, .woff or .woff2 file"));
        }
        if bytes.is_empty() {
            return Err(reject("file is empty"));
        }

        let before = self.db.len();
        self.db.load_font_data(bytes);
        let parsed_family = self
            .db
            .faces()
            .skip(before)
            .find_map(|face| face.families.first().map(|(name, _)| name.clone()));

        let family = match parsed_family {
            Some(name) if !name.trim().is_empty() => name,
            _ if WEB_FONT_EXTENSIONS.contains(&extension.as_str()) && !stem.is_empty() => stem,
            _ => return Err(reject("not a readable font")),
        };

        if !self.contains(&family) {
            tracing::info!("Registered font '{}' from {}", family, file_name);
            self.custom.push(family.clone());
        }
        Ok(family)
    }

    /// True if `family` is a built-in or uploaded family.
    pub fn contains(&self, family: &str) -> bool {
        BUILTIN_FONTS.contains(&family) || self.custom.iter().any(|f| f == family)
    }

    /// Built-in families followed by uploaded ones, in upload order.
    pub fn font_options(&self) -> Vec<String> {
        BUILTIN_FONTS
            .iter()
            .map(|f| f.to_string())
            .chain(self.custom.iter().cloned())
            .collect()
    }

    pub fn custom_fonts(&self) -> &[String] {
        &self.custom
    }

    /// Number of parsed font faces held by the registry.
    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    /// Forgets every uploaded font.
    pub fn clear(&mut self) {
        self.db = Database::new();
        self.custom.clear();
    }
}

impl Default for FontRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FontRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontRegistry")
            .field("faces", &self.db.len())
            .field("custom", &self.custom)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_listed_first() {
        let registry = FontRegistry::new();
        assert_eq!(registry.font_options(), BUILTIN_FONTS.map(String::from).to_vec());
        assert!(registry.contains("Georgia"));
    }

    #[test]
    fn test_web_font_falls_back_to_file_stem() {
        let mut registry = FontRegistry::new();
        let name = registry
            .register("Brand Sans.woff2", vec![0x77, 0x4F, 0x46, 0x32, 0, 1, 0, 0])
            .unwrap();
        assert_eq!(name, "Brand Sans");
        assert_eq!(registry.font_options().last(), Some(&"Brand Sans".to_string()));

        // same upload twice is listed once
        registry
            .register("Brand Sans.woff2", vec![0x77, 0x4F, 0x46, 0x32])
            .unwrap();
        assert_eq!(registry.custom_fonts().len(), 1);
    }

    #[test]
    fn test_rejects_bad_uploads() {
        let mut registry = FontRegistry::new();
        assert!(matches!(
            registry.register("notes.txt", vec![1, 2, 3]),
            Err(DesignError::FontLoad { .. })
        ));
        assert!(registry.register("Empty.ttf", Vec::new()).is_err());
        assert!(registry.register("Garbage.ttf", vec![0xde, 0xad, 0xbe, 0xef]).is_err());
        assert!(registry.custom_fonts().is_empty());
    }

    #[test]
    fn test_clear_drops_uploads() {
        let mut registry = FontRegistry::new();
        registry.register("Script.woff", vec![1, 2, 3, 4]).unwrap();
        registry.clear();
        assert_eq!(registry.font_options().len(), BUILTIN_FONTS.len());
        assert_eq!(registry.face_count(), 0);
    }
}
