//! Compositor geometry settings, loadable from JSON.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{Error, Result};
use crate::matrix::EcLevel;

/// Largest share of the symbol side a logo may cover.
pub const MAX_LOGO_RATIO: f32 = 0.16;

/// Gap between the bottom of a batch cell and its caption.
pub(crate) const LABEL_GAP: u32 = 3;

/// Settings for single renders. Every field has a default, so a partial JSON
/// document such as `{"padding": 24}` is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositorConfig {
    /// Background margin around the symbol area, in pixels, on every side.
    pub padding: u32,
    /// Frame thickness in pixels when a frame is drawn.
    pub frame_width: u32,
    /// Corner radius of the rounded frame's stroke path.
    pub corner_radius: u32,
    /// Symbol side as a fraction of the requested resolution.
    pub symbol_ratio: f32,
    /// Logo box side as a fraction of the symbol side.
    pub logo_ratio: f32,
    /// Label font size as a fraction of the resolution.
    pub label_ratio: f32,
    /// Gap between symbol and label as a fraction of the resolution.
    pub label_gap_ratio: f32,
    pub max_resolution: u32,
    pub error_correction: EcLevel,
    pub batch: BatchConfig,
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            padding: 40,
            frame_width: 20,
            corner_radius: 20,
            symbol_ratio: 0.8,
            logo_ratio: MAX_LOGO_RATIO,
            label_ratio: 0.05,
            label_gap_ratio: 0.05,
            max_resolution: 10_000,
            error_correction: EcLevel::H,
            batch: BatchConfig::default(),
        }
    }
}

/// Settings for batch grids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Side of one cell in pixels.
    pub cell_size: u32,
    /// Gap between neighbouring cells.
    pub cell_padding: u32,
    pub frame_width: u32,
    pub corner_radius: u32,
    pub label_font_px: u32,
    /// Colour of the grid behind the cells, and of unused cells.
    pub canvas_color: Color,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            cell_size: 200,
            cell_padding: 20,
            frame_width: 6,
            corner_radius: 8,
            label_font_px: 14,
            canvas_color: Color::WHITE,
        }
    }
}

impl BatchConfig {
    /// Distance between neighbouring cell origins, or `None` on overflow. A
    /// caption band is included when `labelled` is set.
    pub(crate) fn stride(&self, labelled: bool) -> Option<u32> {
        let band = if labelled { self.label_font_px.checked_add(2 * LABEL_GAP)? } else { 0 };
        self.cell_size.checked_add(self.cell_padding)?.checked_add(band)
    }
}

impl CompositorConfig {
    /// Side of a single-render canvas, or `None` when it overflows `u32`.
    pub(crate) fn canvas_side(&self, resolution_px: u32, frame_width: u32) -> Option<u32> {
        let margin = self.padding.checked_add(frame_width)?.checked_mul(2)?;
        resolution_px.checked_add(margin)
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let ratios = [
            ("symbol_ratio", self.symbol_ratio),
            ("logo_ratio", self.logo_ratio),
            ("label_ratio", self.label_ratio),
            ("label_gap_ratio", self.label_gap_ratio),
        ];
        for (name, value) in ratios {
            if !(value > 0.0 && value <= 1.0) {
                return Err(Error::Config(format!("{name} must be in (0, 1], got {value}")));
            }
        }
        if self.logo_ratio > MAX_LOGO_RATIO {
            return Err(Error::Config(format!(
                "logo_ratio must not exceed {MAX_LOGO_RATIO}, got {}",
                self.logo_ratio
            )));
        }
        if self.max_resolution == 0 {
            return Err(Error::Config("max_resolution must be greater than zero".to_string()));
        }
        if self.batch.cell_size == 0 {
            return Err(Error::Config("batch.cell_size must be greater than zero".to_string()));
        }
        if self.canvas_side(self.max_resolution, self.frame_width).is_none() {
            return Err(Error::Config(format!(
                "padding {} and frame_width {} overflow the canvas at max_resolution {}",
                self.padding, self.frame_width, self.max_resolution
            )));
        }
        if !matches!(self.batch.frame_width.checked_mul(2), Some(frames) if frames < self.batch.cell_size) {
            return Err(Error::Config("batch.frame_width leaves no room for the symbol".to_string()));
        }
        if !matches!(self.batch.stride(true), Some(stride) if stride <= self.max_resolution) {
            return Err(Error::Config("a single batch cell does not fit within max_resolution".to_string()));
        }
        Ok(())
    }
}
