//! Shared constants for frame layout and PDF output
//!
//! This module centralizes unit conversions and the fixed numbers used
//! throughout layout and compositing.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Millimeters per inch
pub const MM_PER_INCH: f64 = 25.4;

/// PDF points per inch
pub const POINTS_PER_INCH: f64 = 72.0;

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f64 = POINTS_PER_INCH / MM_PER_INCH; // ≈ 2.83465

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f64) -> f64 {
    mm * POINTS_PER_MM
}

/// Convert inches to points
#[inline]
pub fn inch_to_pt(inch: f64) -> f64 {
    inch * POINTS_PER_INCH
}

/// Convert points to millimeters
#[inline]
pub fn pt_to_mm(pt: f64) -> f64 {
    pt / POINTS_PER_MM
}

/// Convert inches to millimeters
#[inline]
pub fn inch_to_mm(inch: f64) -> f64 {
    inch * MM_PER_INCH
}

// =============================================================================
// Clusters
// =============================================================================

/// Frames per cluster (2 rows × 2 columns)
pub const FRAMES_PER_CLUSTER: usize = 4;

/// Frames along either axis of a cluster
pub const CLUSTER_SPAN: usize = 2;

// =============================================================================
// Artwork
// =============================================================================

/// Resolution used when the logo has to be rasterized
pub const RASTER_DPI: f64 = 600.0;

/// Resource name of the logo Form XObject on the artwork page
pub const LOGO_XOBJECT_NAME: &str = "Logo";

/// PDF version written for both output documents
pub const PDF_VERSION: &str = "1.7";

// =============================================================================
// Progress
// =============================================================================

pub const PROGRESS_START: u8 = 5;
pub const PROGRESS_ARTWORK: u8 = 50;
pub const PROGRESS_RASTER_FALLBACK: u8 = 75;
pub const PROGRESS_DONE: u8 = 100;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inch_is_72_points() {
        assert_eq!(inch_to_pt(1.0), 72.0);
        assert!((mm_to_pt(25.4) - 72.0).abs() < 1e-9);
    }

    #[test]
    fn test_pt_mm_inverse() {
        for mm in [0.0, 0.5, 10.0, 180.0, 2438.4] {
            assert!((pt_to_mm(mm_to_pt(mm)) - mm).abs() < 1e-9);
        }
    }
}
