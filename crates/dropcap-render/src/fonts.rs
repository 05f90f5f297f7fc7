//! Font loading and lookup backed by fontdue.
//!
//! Families are registered explicitly by name; unknown and generic families
//! fall back to a default font loaded from well-known system locations.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use fontdue::{Font, FontSettings};

/// Common system font paths to search for a default font.
const FONT_SEARCH_PATHS: &[&str] = &[
    // macOS
    "/System/Library/Fonts/Helvetica.ttc",
    "/System/Library/Fonts/SFNS.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    // Linux
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    // Windows
    "C:\\Windows\\Fonts\\arial.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
];

/// Fonts keyed by family name, with a default-family fallback.
#[derive(Default)]
pub struct FontStore {
    fonts: HashMap<String, Font>,
    fallback: Option<Font>,
}

impl FontStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a font under a family name.
    pub fn insert(&mut self, family: &str, font: Font) {
        let _ = self.fonts.insert(family.to_string(), font);
    }

    /// Load a font file and register it under a family name.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed as a font.
    pub fn load_file(&mut self, family: &str, path: &Path) -> Result<()> {
        let data = std::fs::read(path)
            .map_err(|e| anyhow::anyhow!("failed to read font '{}': {e}", path.display()))?;
        let font = Font::from_bytes(data, FontSettings::default())
            .map_err(|e| anyhow::anyhow!("failed to parse font '{}': {e}", path.display()))?;
        self.insert(family, font);
        Ok(())
    }

    /// Try to load a default font from well-known system locations.
    ///
    /// Returns the path that was loaded, or `None` when no candidate exists.
    pub fn load_system_fallback(&mut self) -> Option<&'static str> {
        for path in FONT_SEARCH_PATHS {
            if let Ok(data) = std::fs::read(path)
                && let Ok(font) = Font::from_bytes(data, FontSettings::default())
            {
                self.fallback = Some(font);
                return Some(path);
            }
        }
        None
    }

    /// Use an explicit font as the default-family fallback.
    pub fn set_fallback(&mut self, font: Font) {
        self.fallback = Some(font);
    }

    /// Resolve a family name to a font.
    ///
    /// Exact registrations win; generic keywords
    /// ([§ 2.1.1](https://www.w3.org/TR/css-fonts-4/#generic-font-families))
    /// and unknown families fall back to the default font, the way a user
    /// agent falls back for families it cannot match.
    #[must_use]
    pub fn font_for(&self, family: &str) -> Option<&Font> {
        self.fonts.get(family).or(self.fallback.as_ref())
    }

    /// True when neither registrations nor a fallback are available.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty() && self.fallback.is_none()
    }
}
