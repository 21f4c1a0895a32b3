use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::{CanvasError, CanvasResult};
use crate::stroke::validate_width;

pub const DEFAULT_BRUSH_WIDTH: f32 = 20.0;

/// Current paint attributes used for the next stroke
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushState {
    color: Color32,
    width: f32,
}

impl Default for BrushState {
    fn default() -> Self {
        Self {
            color: Color32::BLACK,
            width: DEFAULT_BRUSH_WIDTH,
        }
    }
}

impl BrushState {
    pub fn new(color: Color32, width: f32) -> CanvasResult<Self> {
        Ok(Self {
            color,
            width: validate_width(width)?,
        })
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn set_color(&mut self, color: Color32) {
        self.color = color;
    }

    /// Rejected widths leave the brush unchanged
    pub fn set_width(&mut self, width: f32) -> CanvasResult<()> {
        self.width = validate_width(width)?;
        Ok(())
    }
}

/// Preset entries of the brush-size dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrushSize {
    Small,
    Medium,
    Large,
}

impl BrushSize {
    pub const ALL: [BrushSize; 3] = [BrushSize::Small, BrushSize::Medium, BrushSize::Large];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Small => "Small",
            Self::Medium => "Medium",
            Self::Large => "Large",
        }
    }
}

/// Widths behind each [`BrushSize`] preset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushSizes {
    pub small: f32,
    pub medium: f32,
    pub large: f32,
}

impl Default for BrushSizes {
    fn default() -> Self {
        Self {
            small: 10.0,
            medium: 20.0,
            large: 30.0,
        }
    }
}

impl BrushSizes {
    pub fn width(&self, size: BrushSize) -> f32 {
        match size {
            BrushSize::Small => self.small,
            BrushSize::Medium => self.medium,
            BrushSize::Large => self.large,
        }
    }
}

/// Parses a palette tag of the form `#RRGGBB` or `#AARRGGBB`
pub fn parse_hex_color(tag: &str) -> CanvasResult<Color32> {
    let invalid = || CanvasError::InvalidColor(tag.to_owned());
    let hex = tag.trim().strip_prefix('#').ok_or_else(invalid)?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let value = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;
    let [a, r, g, b] = match hex.len() {
        6 => (value | 0xFF00_0000).to_be_bytes(),
        8 => value.to_be_bytes(),
        _ => return Err(invalid()),
    };
    Ok(Color32::from_rgba_unmultiplied(r, g, b, a))
}

/// Formats an opaque color as `#RRGGBB`, translucent ones as `#AARRGGBB`
pub fn to_hex_color(color: Color32) -> String {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    if a == u8::MAX {
        format!("#{r:02X}{g:02X}{b:02X}")
    } else {
        format!("#{a:02X}{r:02X}{g:02X}{b:02X}")
    }
}
