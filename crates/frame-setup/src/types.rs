use crate::constants::pt_to_mm;
use crate::render::get_page_dimensions;
use lopdf::Document;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrameError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("Logo error: {0}")]
    Logo(String),
    #[error("Raster error: {0}")]
    Raster(String),
    /// The logo could not be placed in a frame, neither as vector content
    /// nor (when enabled) as a raster image.
    #[error(
        "Could not place logo in frame {sequence_index}: vector embedding failed ({vector}); {}",
        raster_note(.raster)
    )]
    ArtworkEmbed {
        sequence_index: usize,
        vector: String,
        raster: Option<String>,
    },
}

fn raster_note(raster: &Option<String>) -> String {
    match raster {
        Some(reason) => format!("raster fallback failed ({})", reason),
        None => "raster fallback is disabled, enable it to rasterize the logo instead".to_string(),
    }
}

impl FrameError {
    /// True when enabling the raster fallback could let the same job succeed
    pub fn suggests_raster_fallback(&self) -> bool {
        matches!(self, FrameError::ArtworkEmbed { raster: None, .. })
    }
}

pub type Result<T> = std::result::Result<T, FrameError>;

/// Normalized RGB color (components in 0.0..=1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or `#RGB` (the leading `#` is optional)
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim().trim_start_matches('#');
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => {
                return Err(FrameError::Config(format!(
                    "Hex color must be in #RRGGBB or #RGB format, got '{}'",
                    hex
                )));
            }
        };

        let channel = |range: std::ops::Range<usize>| {
            expanded
                .get(range)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .map(|v| v as f32 / 255.0)
                .ok_or_else(|| FrameError::Config(format!("Invalid hex color '{}'", hex)))
        };

        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    pub fn is_normalized(&self) -> bool {
        [self.r, self.g, self.b]
            .iter()
            .all(|c| c.is_finite() && (0.0..=1.0).contains(c))
    }
}

/// How the page height of both output documents is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PageHeight {
    /// Page is the full physical bed (width × height)
    #[default]
    Bed,
    /// Page is as tall as the cluster rows themselves; with a single cluster
    /// row this is exactly twice the frame height
    ClusterBand,
}

/// A logo converted to PDF, positioned by the first page's MediaBox
#[derive(Debug, Clone, PartialEq)]
pub struct LogoAsset {
    pub name: String,
    pub pdf_bytes: Vec<u8>,
    pub width_pt: f64,
    pub height_pt: f64,
}

impl LogoAsset {
    /// Build a logo from PDF bytes, reading its size from the first page
    pub fn from_pdf_bytes(name: impl Into<String>, pdf_bytes: Vec<u8>) -> Result<Self> {
        let name = name.into();
        let doc = Document::load_mem(&pdf_bytes)?;
        let page_id = doc
            .get_pages()
            .values()
            .next()
            .copied()
            .ok_or_else(|| FrameError::Logo(format!("'{}' has no pages", name)))?;
        let (width_pt, height_pt) = get_page_dimensions(&doc, page_id)?;

        Ok(Self {
            name,
            pdf_bytes,
            width_pt,
            height_pt,
        })
    }

    /// Zero-size stand-in used when only outlines are generated
    pub fn placeholder() -> Self {
        Self {
            name: "placeholder".to_string(),
            pdf_bytes: Vec::new(),
            width_pt: 0.0,
            height_pt: 0.0,
        }
    }

    pub fn has_size(&self) -> bool {
        self.width_pt > 0.0 && self.height_pt > 0.0
    }

    pub fn size_mm(&self) -> (f64, f64) {
        (pt_to_mm(self.width_pt), pt_to_mm(self.height_pt))
    }
}

/// Paths actually written by one generation call
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExportResult {
    pub outline_path: Option<PathBuf>,
    pub artwork_path: Option<PathBuf>,
}

/// Capacity and usage figures for a job, all lengths in millimeters
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutStatistics {
    /// Clusters that fit across the bed width
    pub horizontal_capacity: usize,
    /// Cluster rows that fit within the bed height
    pub vertical_capacity: usize,
    /// Frame slots produced by the selected clusters
    pub total_frames: usize,
    /// Frame slots that receive a logo
    pub active_frames: usize,
    pub used_width_mm: f64,
    pub used_height_mm: f64,
    pub bed_width_mm: f64,
    pub bed_height_mm: f64,
    pub matte: crate::layout::MatteGeometry,
    /// Every logo is mirrored for reverse printing
    pub mirrored_logos: bool,
    /// Bottom-half logos are turned upside down
    pub rotated_bottom_logos: bool,
}

impl LayoutStatistics {
    pub fn width_usage(&self) -> f64 {
        if self.bed_width_mm > 0.0 {
            self.used_width_mm / self.bed_width_mm
        } else {
            0.0
        }
    }

    pub fn height_usage(&self) -> f64 {
        if self.bed_height_mm > 0.0 {
            self.used_height_mm / self.bed_height_mm
        } else {
            0.0
        }
    }

    /// The selected clusters run past the bed on either axis
    pub fn overflows_bed(&self) -> bool {
        self.width_usage() > 1.001 || self.height_usage() > 1.001
    }
}
