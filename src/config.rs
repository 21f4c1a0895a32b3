use egui::Color32;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::brush::{BrushSizes, BrushState, DEFAULT_BRUSH_WIDTH, parse_hex_color};
use crate::error::{CanvasError, CanvasResult};

/// Environment variable the binary reads a config file path from
pub const CONFIG_ENV_VAR: &str = "DRAWING_APP_CONFIG";

/// Startup settings for a drawing session.
///
/// Every field has a default, so a config file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Palette tags, `#RRGGBB` or `#AARRGGBB`
    pub palette: Vec<String>,
    /// Palette entry selected when the session starts
    pub default_color_index: usize,
    pub default_brush_width: f32,
    pub brush_sizes: BrushSizes,
    /// Prefix of exported file names
    pub export_prefix: String,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            palette: [
                "#FFE0BD", "#000000", "#F44336", "#4CAF50", "#2196F3", "#FFEB3B", "#FF9800",
                "#FFFFFF",
            ]
            .iter()
            .map(|tag| (*tag).to_owned())
            .collect(),
            default_color_index: 1,
            default_brush_width: DEFAULT_BRUSH_WIDTH,
            brush_sizes: BrushSizes::default(),
            export_prefix: "DrawingApp_".to_owned(),
        }
    }
}

impl CanvasConfig {
    pub fn from_json(text: &str) -> CanvasResult<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> CanvasResult<Self> {
        let path = path.as_ref();
        log::info!("Loading canvas config from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> CanvasResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn validate(&self) -> CanvasResult<()> {
        let colors = self.palette_colors()?;
        if colors.is_empty() {
            return Err(CanvasError::Config("palette is empty".to_owned()));
        }
        if self.default_color_index >= colors.len() {
            return Err(CanvasError::Config(format!(
                "default_color_index {} is outside the palette of {} colors",
                self.default_color_index,
                colors.len()
            )));
        }
        BrushState::new(Color32::BLACK, self.default_brush_width)?;
        for width in [self.brush_sizes.small, self.brush_sizes.medium, self.brush_sizes.large] {
            BrushState::new(Color32::BLACK, width)?;
        }
        Ok(())
    }

    pub fn palette_colors(&self) -> CanvasResult<Vec<Color32>> {
        self.palette.iter().map(|tag| parse_hex_color(tag)).collect()
    }

    /// Brush a new session starts with
    pub fn initial_brush(&self) -> CanvasResult<BrushState> {
        let colors = self.palette_colors()?;
        let color = colors
            .get(self.default_color_index)
            .copied()
            .unwrap_or(Color32::BLACK);
        BrushState::new(color, self.default_brush_width)
    }
}
