//! Grid layout calculation
//!
//! Clusters of 2×2 frames tile across the bed with the cluster gap between
//! them, and cluster rows stack up the bed with the row gap between them.

use crate::constants::{CLUSTER_SPAN, inch_to_pt, mm_to_pt};
use crate::options::JobParameters;
use crate::types::PageHeight;

use super::{FramePlacement, FrameRow, Layout, Rect, span};

/// Inputs of the grid engine, lengths in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    pub frame_width: f64,
    pub frame_height: f64,
    pub cluster_gap: f64,
    pub row_gap: f64,
    pub cluster_count: usize,
    pub cluster_row_count: usize,
    /// Number of frames that receive a logo; 0 activates every frame
    pub frame_quantity: usize,
    pub bed_width: f64,
    pub bed_height: f64,
    pub page_height: PageHeight,
}

impl GridSpec {
    /// Convert the job's millimeter/inch fields into points
    pub fn from_params(params: &JobParameters) -> Self {
        Self {
            frame_width: mm_to_pt(params.frame_width_mm),
            frame_height: mm_to_pt(params.frame_height_mm),
            cluster_gap: mm_to_pt(params.cluster_gap_mm),
            row_gap: mm_to_pt(params.row_gap_mm),
            cluster_count: params.cluster_count,
            cluster_row_count: params.cluster_row_count,
            frame_quantity: params.frame_quantity,
            bed_width: inch_to_pt(params.bed_width_in),
            bed_height: inch_to_pt(params.bed_height_in),
            page_height: params.page_height,
        }
    }
}

// =============================================================================
// Grid Creation
// =============================================================================

/// Build the layout for a job
pub fn build_layout(params: &JobParameters) -> Layout {
    create_grid_layout(&GridSpec::from_params(params))
}

/// Enumerate every frame slot and size the page.
///
/// Placements are produced cluster row by cluster row (bottom up), then
/// cluster by cluster (left to right), then bottom half before top half,
/// then left column before right column. This function performs no
/// validation; it is total over its inputs.
pub fn create_grid_layout(spec: &GridSpec) -> Layout {
    let cluster_width = spec.frame_width * CLUSTER_SPAN as f64;
    let cluster_height = spec.frame_height * CLUSTER_SPAN as f64;

    let total = spec.cluster_count * spec.cluster_row_count * CLUSTER_SPAN * CLUSTER_SPAN;
    let mut placements = Vec::with_capacity(total);
    let mut sequence_index = 0;

    for cluster_row in 0..spec.cluster_row_count {
        let base_y = cluster_row as f64 * (cluster_height + spec.row_gap);
        for cluster_index in 0..spec.cluster_count {
            let base_x = cluster_index as f64 * (cluster_width + spec.cluster_gap);
            for row in FrameRow::ALL {
                let y = base_y + row.index() as f64 * spec.frame_height;
                for column in 0..CLUSTER_SPAN {
                    let x = base_x + column as f64 * spec.frame_width;
                    sequence_index += 1;
                    placements.push(FramePlacement {
                        cluster_index,
                        cluster_row,
                        row,
                        column,
                        rect: Rect::new(x, y, spec.frame_width, spec.frame_height),
                        active: spec.frame_quantity == 0 || sequence_index <= spec.frame_quantity,
                        sequence_index,
                    });
                }
            }
        }
    }

    let page_height = match spec.page_height {
        PageHeight::Bed => spec.bed_height,
        PageHeight::ClusterBand => {
            span(spec.cluster_row_count.max(1), cluster_height, spec.row_gap)
        }
    };

    Layout {
        page_width: spec.bed_width,
        page_height,
        frame_width: spec.frame_width,
        frame_height: spec.frame_height,
        cluster_gap: spec.cluster_gap,
        row_gap: spec.row_gap,
        cluster_count: spec.cluster_count,
        cluster_row_count: spec.cluster_row_count,
        placements,
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(clusters: usize, rows: usize, quantity: usize) -> GridSpec {
        GridSpec {
            frame_width: 180.0,
            frame_height: 240.0,
            cluster_gap: 15.0,
            row_gap: 25.0,
            cluster_count: clusters,
            cluster_row_count: rows,
            frame_quantity: quantity,
            bed_width: 2000.0,
            bed_height: 1200.0,
            page_height: PageHeight::Bed,
        }
    }

    #[test]
    fn test_single_cluster_order() {
        let layout = create_grid_layout(&spec(1, 1, 0));
        let order: Vec<_> = layout
            .placements
            .iter()
            .map(|p| (p.row, p.column, p.rect.x, p.rect.y))
            .collect();
        assert_eq!(
            order,
            vec![
                (FrameRow::Bottom, 0, 0.0, 0.0),
                (FrameRow::Bottom, 1, 180.0, 0.0),
                (FrameRow::Top, 0, 0.0, 240.0),
                (FrameRow::Top, 1, 180.0, 240.0),
            ]
        );
    }

    #[test]
    fn test_cluster_and_row_offsets() {
        let layout = create_grid_layout(&spec(2, 2, 0));
        assert_eq!(layout.placements.len(), 16);

        // Second cluster of the first row starts after one cluster and a gap
        let p = &layout.placements[4];
        assert_eq!((p.cluster_row, p.cluster_index), (0, 1));
        assert_eq!(p.rect.x, 375.0);
        assert_eq!(p.rect.y, 0.0);

        // First cluster of the second row sits above one cluster and a row gap
        let p = &layout.placements[8];
        assert_eq!((p.cluster_row, p.cluster_index), (1, 0));
        assert_eq!(p.rect.x, 0.0);
        assert_eq!(p.rect.y, 505.0);
    }

    #[test]
    fn test_sequence_indices_are_one_based() {
        let layout = create_grid_layout(&spec(3, 2, 0));
        for (i, p) in layout.placements.iter().enumerate() {
            assert_eq!(p.sequence_index, i + 1);
        }
    }

    #[test]
    fn test_zero_quantity_activates_all() {
        let layout = create_grid_layout(&spec(2, 1, 0));
        assert_eq!(layout.active_count(), 8);
    }

    #[test]
    fn test_page_height_modes() {
        let layout = create_grid_layout(&spec(2, 1, 0));
        assert_eq!(layout.page_width, 2000.0);
        assert_eq!(layout.page_height, 1200.0);

        let mut band = spec(2, 1, 0);
        band.page_height = PageHeight::ClusterBand;
        let layout = create_grid_layout(&band);
        assert_eq!(layout.page_width, 2000.0);
        assert_eq!(layout.page_height, 480.0);
    }

    #[test]
    fn test_no_clusters() {
        let layout = create_grid_layout(&spec(0, 1, 4));
        assert!(layout.placements.is_empty());
        assert_eq!(layout.content_width(), 0.0);
    }
}
