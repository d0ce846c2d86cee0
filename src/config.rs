use std::path::Path;

use serde::Deserialize;

use crate::error::DiffError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// Treat number words and numerals with the same value as equivalent
    /// ("three" ↔ "3", "first" ↔ "1st").
    pub number_equivalence: bool,
    /// LCS table size (hypothesis × reference cells) above which a warning is
    /// logged. Alignment still runs; the table is O(m·n) in memory.
    pub dp_cell_warn_threshold: usize,
}

impl DiffConfig {
    pub const DEFAULT_DP_CELL_WARN_THRESHOLD: usize = 4_000_000;

    pub fn load(path: &Path) -> Result<Self, DiffError> {
        let data =
            std::fs::read_to_string(path).map_err(|e| DiffError::io("read diff config", e))?;
        serde_json::from_str(&data).map_err(|e| DiffError::json("parse diff config", e))
    }
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            number_equivalence: true,
            dp_cell_warn_threshold: Self::DEFAULT_DP_CELL_WARN_THRESHOLD,
        }
    }
}

/// Label geometry used by the overlap resolver. Renderers must use the same
/// values so previews and exports place labels identically.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Estimated glyph advance as a fraction of the font size.
    pub width_factor: f64,
    /// Extra vertical space added to every upward push.
    pub label_gap: f64,
    /// Gap between a word's top edge and the baseline of its label.
    pub text_gap: f64,
    pub caret_size: f64,
    pub caret_label_gap: f64,
    /// Default font size as a fraction of the annotated word's bbox height.
    pub font_height_ratio: f64,
    pub min_font_size: f64,
    pub max_font_size: f64,
    pub max_iterations: usize,
}

impl LayoutConfig {
    pub fn load(path: &Path) -> Result<Self, DiffError> {
        let data =
            std::fs::read_to_string(path).map_err(|e| DiffError::io("read layout config", e))?;
        let config: Self =
            serde_json::from_str(&data).map_err(|e| DiffError::json("parse layout config", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DiffError> {
        let sizes = [
            ("width_factor", self.width_factor),
            ("label_gap", self.label_gap),
            ("text_gap", self.text_gap),
            ("caret_size", self.caret_size),
            ("caret_label_gap", self.caret_label_gap),
            ("font_height_ratio", self.font_height_ratio),
            ("min_font_size", self.min_font_size),
            ("max_font_size", self.max_font_size),
        ];
        if let Some((name, value)) = sizes.iter().find(|(_, v)| !v.is_finite()) {
            return Err(DiffError::invalid_input(
                "validating layout config",
                format!("{name} must be finite, got {value}"),
            ));
        }
        if self.min_font_size > self.max_font_size {
            return Err(DiffError::invalid_input(
                "validating layout config",
                format!(
                    "min_font_size {} exceeds max_font_size {}",
                    self.min_font_size, self.max_font_size
                ),
            ));
        }
        Ok(())
    }

    /// Never panics; an inverted range resolves to `max_font_size`.
    pub(crate) fn default_font_size(&self, bbox_height: f64) -> f64 {
        (bbox_height * self.font_height_ratio)
            .round()
            .max(self.min_font_size)
            .min(self.max_font_size)
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width_factor: 0.6,
            label_gap: 4.0,
            text_gap: 6.0,
            caret_size: 10.0,
            caret_label_gap: 4.0,
            font_height_ratio: 0.5,
            min_font_size: 10.0,
            max_font_size: 48.0,
            max_iterations: 20,
        }
    }
}
