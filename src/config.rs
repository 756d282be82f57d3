//! Configuration for form appearance generation.

use crate::compliance::PdfALevel;
use crate::error::{Error, Result};
use crate::fonts::StandardFont;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Form appearance configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// PDF/A level the document must conform to, if any.
    pub conformance: Option<PdfALevel>,

    /// `/BaseFont` of the font used when a field names none.
    pub default_font: String,

    /// Font size used when nothing specifies one, and the upper bound of
    /// multi-line auto sizing.
    pub default_font_size: f32,

    /// Lower bound for auto-sized text.
    pub min_font_size: f32,

    /// Flate-compress generated appearance streams.
    pub compress_streams: bool,

    /// Regenerate appearances eagerly on every setter.
    pub regenerate_on_change: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl FormConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            conformance: None,
            default_font: StandardFont::Helvetica.base_font().to_string(),
            default_font_size: 12.0,
            min_font_size: 4.0,
            compress_streams: false,
            regenerate_on_change: true,
        }
    }

    /// Target a PDF/A level.
    pub fn with_conformance(mut self, level: PdfALevel) -> Self {
        self.conformance = Some(level);
        self
    }

    /// Set the fallback font.
    pub fn with_default_font(mut self, font: StandardFont) -> Self {
        self.default_font = font.base_font().to_string();
        self
    }

    /// Set the fallback font size.
    pub fn with_default_font_size(mut self, size: f32) -> Self {
        self.default_font_size = size;
        self
    }

    /// Set the auto-size floor.
    pub fn with_min_font_size(mut self, size: f32) -> Self {
        self.min_font_size = size;
        self
    }

    /// Enable stream compression.
    pub fn with_compression(mut self, enable: bool) -> Self {
        self.compress_streams = enable;
        self
    }

    /// Enable or disable eager regeneration.
    pub fn with_regeneration(mut self, enable: bool) -> Self {
        self.regenerate_on_change = enable;
        self
    }

    /// The fallback font, Helvetica when the configured name is unknown.
    pub fn default_standard_font(&self) -> StandardFont {
        StandardFont::from_base_font(&self.default_font).unwrap_or_else(|| {
            log::warn!(
                "Unknown default font '{}', using Helvetica",
                self.default_font
            );
            StandardFont::Helvetica
        })
    }

    /// Parse configuration from JSON. Missing keys take default values.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}
