use crate::colors::DEFAULT_OUTLINE_COLOR;
use crate::constants::FRAMES_PER_CLUSTER;
use crate::layout::{horizontal_capacity, vertical_capacity};
use crate::types::*;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Every numeric and configuration input of one frame run
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct JobParameters {
    pub job_name: String,

    // Frame
    pub frame_width_mm: f64,
    pub frame_height_mm: f64,
    pub indent_mm: f64,
    pub matte_total_height_mm: f64,

    // Arrangement
    pub cluster_gap_mm: f64,
    pub row_gap_mm: f64,
    pub cluster_count: usize,
    pub cluster_row_count: usize,
    pub frame_quantity: usize,

    // Bed
    pub bed_width_in: f64,
    pub bed_height_in: f64,
    pub page_height: PageHeight,

    // Outlines
    pub outline_color: Rgb,
    pub outline_thickness_mm: f64,

    // Artwork
    pub flip_in_app: bool,
    pub rotate_bottom_row: bool,
    pub allow_raster_fallback: bool,

    // Output
    pub output_directory: PathBuf,
    pub outline_filename: String,
    pub artwork_filename: String,
    pub export_outlines: bool,
    pub export_artwork: bool,
}

impl Default for JobParameters {
    fn default() -> Self {
        let job_name = "SRG_Frame_Run".to_string();
        let (outline_filename, artwork_filename) = default_filenames(&job_name);
        Self {
            job_name,
            frame_width_mm: 180.0,
            frame_height_mm: 240.0,
            indent_mm: 10.0,
            matte_total_height_mm: 120.0,
            cluster_gap_mm: 15.0,
            row_gap_mm: 25.0,
            cluster_count: 1,
            cluster_row_count: 1,
            frame_quantity: 4,
            bed_width_in: 96.0,
            bed_height_in: 48.0,
            page_height: PageHeight::Bed,
            outline_color: DEFAULT_OUTLINE_COLOR,
            outline_thickness_mm: 0.5,
            flip_in_app: false,
            rotate_bottom_row: true,
            allow_raster_fallback: false,
            output_directory: PathBuf::from("."),
            outline_filename,
            artwork_filename,
            export_outlines: true,
            export_artwork: true,
        }
    }
}

impl JobParameters {
    /// Load parameters from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let params = serde_json::from_slice(&bytes)
            .map_err(|e| FrameError::Config(format!("Failed to parse job file: {}", e)))?;
        Ok(params)
    }

    /// Save parameters to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| FrameError::Config(format!("Failed to serialize job: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Rename the job and derive both output file names from it
    pub fn with_job_name(mut self, job_name: impl Into<String>) -> Self {
        self.job_name = job_name.into();
        let (outline_filename, artwork_filename) = default_filenames(&self.job_name);
        self.outline_filename = outline_filename;
        self.artwork_filename = artwork_filename;
        self
    }

    pub fn outline_path(&self) -> PathBuf {
        self.output_directory.join(&self.outline_filename)
    }

    pub fn artwork_path(&self) -> PathBuf {
        self.output_directory.join(&self.artwork_filename)
    }

    /// Frame slots produced by the selected clusters
    pub fn max_frames(&self) -> usize {
        self.cluster_count * self.cluster_row_count * FRAMES_PER_CLUSTER
    }

    /// Validate the parameters
    pub fn validate(&self) -> Result<()> {
        if self.job_name.trim().is_empty() {
            return Err(invalid("Job name", "cannot be empty"));
        }

        for (field, value) in [
            ("Frame width", self.frame_width_mm),
            ("Frame height", self.frame_height_mm),
            ("Matte total height", self.matte_total_height_mm),
            ("Bed width", self.bed_width_in),
            ("Bed height", self.bed_height_in),
            ("Outline thickness", self.outline_thickness_mm),
        ] {
            if !value.is_finite() {
                return Err(invalid(field, "must be a number"));
            }
            if value <= 0.0 {
                return Err(invalid(field, "must be greater than zero"));
            }
        }

        for (field, value) in [
            ("Frame indent", self.indent_mm),
            ("Cluster gap", self.cluster_gap_mm),
            ("Row gap", self.row_gap_mm),
        ] {
            if !value.is_finite() {
                return Err(invalid(field, "must be a number"));
            }
            if value < 0.0 {
                return Err(invalid(field, "must be zero or greater"));
            }
        }

        if !self.outline_color.is_normalized() {
            return Err(invalid("Outline color", "components must be between 0 and 1"));
        }

        if self.cluster_count < 1 {
            return Err(invalid("Cluster count", "must be at least 1"));
        }
        if self.cluster_row_count < 1 {
            return Err(invalid("Cluster rows", "must be at least 1"));
        }

        let horizontal = horizontal_capacity(self);
        let vertical = vertical_capacity(self);
        if horizontal < 1 || vertical < 1 {
            return Err(invalid(
                "Cluster layout",
                "does not fit on the bed with current settings",
            ));
        }
        if self.cluster_count > horizontal {
            return Err(invalid(
                "Cluster count",
                &format!("cannot exceed {} across the bed width", horizontal),
            ));
        }
        if self.cluster_row_count > vertical {
            return Err(invalid(
                "Cluster rows",
                &format!("cannot exceed {} within the bed height", vertical),
            ));
        }

        let max_frames = self.max_frames();
        if self.frame_quantity < 1 {
            return Err(invalid("Frame quantity", "must be at least 1"));
        }
        if self.frame_quantity > max_frames {
            return Err(invalid(
                "Frame quantity",
                &format!("cannot exceed {} for the selected clusters", max_frames),
            ));
        }

        if !self.export_outlines && !self.export_artwork {
            return Err(FrameError::Config(
                "Select at least one PDF to export".to_string(),
            ));
        }
        if self.export_outlines && self.outline_filename.trim().is_empty() {
            return Err(invalid("Outline filename", "cannot be empty"));
        }
        if self.export_artwork && self.artwork_filename.trim().is_empty() {
            return Err(invalid("Artwork filename", "cannot be empty"));
        }

        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> FrameError {
    FrameError::Config(format!("{}: {}", field, message))
}

/// Reduce a job name to lowercase ASCII words joined by underscores
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    for c in value.trim().to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
        } else if !slug.ends_with('_') {
            slug.push('_');
        }
    }
    let slug = slug.trim_matches('_');
    if slug.is_empty() {
        "job".to_string()
    } else {
        slug.to_string()
    }
}

/// Outline and artwork file names for a job
pub fn default_filenames(job_name: &str) -> (String, String) {
    let slug = slugify(job_name);
    (
        format!("{}_ArizonaOutlines.pdf", slug),
        format!("{}_ArizonaArtwork.pdf", slug),
    )
}
