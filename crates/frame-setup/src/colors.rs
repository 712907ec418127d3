//! Preset outline colors
//!
//! The presets are resolved to an [`Rgb`] before a job reaches layout or
//! rendering.

use crate::types::{FrameError, Result, Rgb};

/// A named outline color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutlineColor {
    pub name: &'static str,
    pub hex_value: &'static str,
}

pub const PRESET_COLORS: &[OutlineColor] = &[
    OutlineColor {
        name: "SRG Scarlet",
        hex_value: "#D22630",
    },
    OutlineColor {
        name: "SRG Charcoal",
        hex_value: "#2D2926",
    },
    OutlineColor {
        name: "SRG Silver",
        hex_value: "#A7A8AA",
    },
    OutlineColor {
        name: "Pure Black",
        hex_value: "#000000",
    },
    OutlineColor {
        name: "Bright White",
        hex_value: "#FFFFFF",
    },
];

pub const DEFAULT_COLOR_NAME: &str = "SRG Scarlet";

/// SRG Scarlet (#D22630)
pub const DEFAULT_OUTLINE_COLOR: Rgb = Rgb::new(210.0 / 255.0, 38.0 / 255.0, 48.0 / 255.0);

/// Look up a preset by name, ignoring case and surrounding whitespace
pub fn preset_color(name: &str) -> Option<&'static OutlineColor> {
    let name = name.trim();
    PRESET_COLORS
        .iter()
        .find(|preset| preset.name.eq_ignore_ascii_case(name))
}

/// Resolve a preset name to its RGB value
pub fn resolve_preset(name: &str) -> Result<Rgb> {
    let preset = preset_color(name).ok_or_else(|| {
        let known: Vec<_> = PRESET_COLORS.iter().map(|p| p.name).collect();
        FrameError::Config(format!(
            "Unknown outline color '{}' (expected one of: {})",
            name,
            known.join(", ")
        ))
    })?;
    Rgb::from_hex(preset.hex_value)
}
