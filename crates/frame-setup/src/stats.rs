use crate::constants::{FRAMES_PER_CLUSTER, inch_to_mm};
use crate::layout::{calculate_matte_geometry, horizontal_capacity, span, vertical_capacity};
use crate::options::JobParameters;
use crate::types::*;

/// Calculate capacity and usage figures for a job without building documents
pub fn calculate_statistics(params: &JobParameters) -> LayoutStatistics {
    let total_frames = params.cluster_count * params.cluster_row_count * FRAMES_PER_CLUSTER;
    let active_frames = if params.frame_quantity == 0 {
        total_frames
    } else {
        params.frame_quantity.min(total_frames)
    };

    let used_width_mm = span(
        params.cluster_count,
        params.frame_width_mm * 2.0,
        params.cluster_gap_mm,
    );
    let used_height_mm = span(
        params.cluster_row_count,
        params.frame_height_mm * 2.0,
        params.row_gap_mm,
    );

    LayoutStatistics {
        horizontal_capacity: horizontal_capacity(params),
        vertical_capacity: vertical_capacity(params),
        total_frames,
        active_frames,
        used_width_mm,
        used_height_mm,
        bed_width_mm: inch_to_mm(params.bed_width_in),
        bed_height_mm: inch_to_mm(params.bed_height_in),
        matte: calculate_matte_geometry(
            params.frame_width_mm,
            params.frame_height_mm,
            params.indent_mm,
            params.matte_total_height_mm,
        ),
        mirrored_logos: params.flip_in_app,
        rotated_bottom_logos: params.rotate_bottom_row,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_job() {
        let stats = calculate_statistics(&JobParameters::default());
        assert_eq!(stats.horizontal_capacity, 6);
        assert_eq!(stats.vertical_capacity, 2);
        assert_eq!(stats.total_frames, 4);
        assert_eq!(stats.active_frames, 4);
        assert_eq!(stats.used_width_mm, 360.0);
        assert_eq!(stats.used_height_mm, 480.0);
        assert!((stats.bed_width_mm - 2438.4).abs() < 1e-9);
        assert!(!stats.overflows_bed());
        assert!(stats.rotated_bottom_logos);
        assert!(!stats.mirrored_logos);
    }

    #[test]
    fn test_overflow_detected() {
        let params = JobParameters {
            cluster_count: 7,
            ..JobParameters::default()
        };
        let stats = calculate_statistics(&params);
        // 7 * 360 + 6 * 15 = 2610 mm on a 2438.4 mm bed
        assert_eq!(stats.used_width_mm, 2610.0);
        assert!(stats.overflows_bed());
    }

    #[test]
    fn test_quantity_is_capped() {
        let params = JobParameters {
            frame_quantity: 0,
            cluster_count: 2,
            ..JobParameters::default()
        };
        assert_eq!(calculate_statistics(&params).active_frames, 8);

        let params = JobParameters {
            frame_quantity: 50,
            ..JobParameters::default()
        };
        assert_eq!(calculate_statistics(&params).active_frames, 4);
    }
}
