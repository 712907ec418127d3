//! Logo placement within frames
//!
//! Each half of a cluster presents its matte band toward the cluster's
//! horizontal seam, so logos in the top half are centred up from the frame's
//! bottom edge and logos in the bottom half down from the frame's top edge.

use crate::constants::mm_to_pt;
use crate::options::JobParameters;
use crate::types::LogoAsset;

use super::{
    FramePlacement, FrameRow, Layout, LogoPlacement, Rect, calculate_matte_geometry,
};

/// Inputs of the placement resolver, lengths in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementSpec {
    /// Visible matte band (already limited to the frame height)
    pub visible_band: f64,
    pub indent: f64,
    pub logo_width: f64,
    pub logo_height: f64,
    pub flip_in_app: bool,
    pub rotate_bottom_row: bool,
}

impl PlacementSpec {
    /// Derive the band from the job's matte geometry and size the logo natively
    pub fn from_params(params: &JobParameters, logo: &LogoAsset) -> Self {
        let matte = calculate_matte_geometry(
            params.frame_width_mm,
            params.frame_height_mm,
            params.indent_mm,
            params.matte_total_height_mm,
        );
        let frame_height = mm_to_pt(params.frame_height_mm.max(0.0));

        Self {
            visible_band: mm_to_pt(matte.visible_band_mm).min(frame_height),
            indent: mm_to_pt(params.indent_mm.max(0.0)),
            logo_width: logo.width_pt,
            logo_height: logo.height_pt,
            flip_in_app: params.flip_in_app,
            rotate_bottom_row: params.rotate_bottom_row,
        }
    }
}

/// Resolve the logo rectangle and orientation for every active frame.
///
/// Returns an empty list when there is no visible band or the logo has no
/// size. Inactive frames are skipped.
pub fn resolve_logo_placements(layout: &Layout, spec: &PlacementSpec) -> Vec<LogoPlacement> {
    if spec.visible_band <= 0.0 || spec.logo_width <= 0.0 || spec.logo_height <= 0.0 {
        return Vec::new();
    }

    layout
        .active_placements()
        .map(|frame| resolve_one(frame, spec))
        .collect()
}

fn resolve_one(frame: &FramePlacement, spec: &PlacementSpec) -> LogoPlacement {
    let rect = &frame.rect;
    let center_x = rect.center_x();
    let target_y = match frame.row {
        FrameRow::Top => rect.y + spec.visible_band / 2.0,
        FrameRow::Bottom => rect.top() - spec.visible_band / 2.0,
    };
    let center_y = clamp_center_y(rect, target_y, spec.indent, spec.logo_height);

    LogoPlacement {
        sequence_index: frame.sequence_index,
        rect: Rect::centered(center_x, center_y, spec.logo_width, spec.logo_height),
        mirror: spec.flip_in_app,
        rotate_180: spec.rotate_bottom_row && frame.row == FrameRow::Bottom,
    }
}

/// Keep the logo clear of the indent; if it is too tall for that, keep it
/// inside the frame instead.
fn clamp_center_y(frame: &Rect, center_y: f64, indent: f64, logo_height: f64) -> f64 {
    let half = logo_height / 2.0;
    let (mut min_center, mut max_center) = (frame.y + indent + half, frame.top() - indent - half);
    if min_center > max_center {
        min_center = frame.y + half;
        max_center = frame.top() - half;
    }
    // max before min: an inverted range still resolves to its lower bound
    center_y.min(max_center).max(min_center)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{GridSpec, create_grid_layout};
    use crate::types::PageHeight;

    fn layout(quantity: usize) -> Layout {
        create_grid_layout(&GridSpec {
            frame_width: 200.0,
            frame_height: 300.0,
            cluster_gap: 10.0,
            row_gap: 20.0,
            cluster_count: 1,
            cluster_row_count: 1,
            frame_quantity: quantity,
            bed_width: 1000.0,
            bed_height: 1000.0,
            page_height: PageHeight::Bed,
        })
    }

    fn spec() -> PlacementSpec {
        PlacementSpec {
            visible_band: 100.0,
            indent: 10.0,
            logo_width: 60.0,
            logo_height: 40.0,
            flip_in_app: false,
            rotate_bottom_row: true,
        }
    }

    #[test]
    fn test_band_faces_seam() {
        let placements = resolve_logo_placements(&layout(0), &spec());
        assert_eq!(placements.len(), 4);

        // Bottom half: centred 50pt below the frame's top edge (y = 300)
        assert_eq!(placements[0].rect.center_y(), 250.0);
        assert_eq!(placements[0].rect.center_x(), 100.0);
        // Top half: centred 50pt above the frame's bottom edge (y = 300)
        assert_eq!(placements[2].rect.center_y(), 350.0);
        assert_eq!(placements[3].rect.center_x(), 300.0);
    }

    #[test]
    fn test_rotation_only_on_bottom_row() {
        let placements = resolve_logo_placements(&layout(0), &spec());
        let rotated: Vec<_> = placements.iter().map(|p| p.rotate_180).collect();
        assert_eq!(rotated, vec![true, true, false, false]);

        let mut no_rotate = spec();
        no_rotate.rotate_bottom_row = false;
        assert!(
            resolve_logo_placements(&layout(0), &no_rotate)
                .iter()
                .all(|p| !p.rotate_180)
        );
    }

    #[test]
    fn test_mirror_applies_to_every_row() {
        let mut flipped = spec();
        flipped.flip_in_app = true;
        let placements = resolve_logo_placements(&layout(0), &flipped);
        assert!(placements.iter().all(|p| p.mirror));
    }

    #[test]
    fn test_inactive_frames_skipped() {
        let placements = resolve_logo_placements(&layout(3), &spec());
        let indices: Vec<_> = placements.iter().map(|p| p.sequence_index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
    }

    #[test]
    fn test_no_band_or_logo_gives_nothing() {
        let mut no_band = spec();
        no_band.visible_band = 0.0;
        assert!(resolve_logo_placements(&layout(0), &no_band).is_empty());

        let mut no_logo = spec();
        no_logo.logo_width = 0.0;
        assert!(resolve_logo_placements(&layout(0), &no_logo).is_empty());
    }

    #[test]
    fn test_clamped_inside_indent() {
        // A band of the whole frame would centre the logo on the frame's middle;
        // a tiny band pushes it against the seam, where the indent stops it.
        let mut thin = spec();
        thin.visible_band = 2.0;
        let placements = resolve_logo_placements(&layout(0), &thin);
        // Bottom half: top edge 300, indent 10, half logo 20
        assert_eq!(placements[0].rect.center_y(), 270.0);
        // Top half: bottom edge 300
        assert_eq!(placements[2].rect.center_y(), 330.0);
    }

    #[test]
    fn test_tall_logo_ignores_indent() {
        let frame = Rect::new(0.0, 0.0, 100.0, 100.0);
        // 90pt logo cannot clear a 10pt indent on both sides
        assert_eq!(clamp_center_y(&frame, 95.0, 10.0, 90.0), 55.0);
        assert_eq!(clamp_center_y(&frame, 5.0, 10.0, 90.0), 45.0);
    }

    #[test]
    fn test_center_stays_inside_frame() {
        let frame = Rect::new(0.0, 500.0, 100.0, 300.0);
        for logo_height in [0.0, 10.0, 150.0, 280.0, 300.0] {
            for indent in [0.0, 10.0, 200.0] {
                for target in [-1000.0, 500.0, 650.0, 800.0, 5000.0] {
                    let c = clamp_center_y(&frame, target, indent, logo_height);
                    assert!(c >= frame.y && c <= frame.top(), "{logo_height} {indent} {target}");
                }
            }
        }
    }
}
