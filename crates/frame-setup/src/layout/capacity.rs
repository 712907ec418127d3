//! Bed capacity
//!
//! How many whole repeating units fit along one axis of the bed.

use crate::constants::inch_to_mm;
use crate::options::JobParameters;

/// Maximum number of tiles of `repeat_size` separated by `gap` that fit in
/// `bound`.
///
/// `n` tiles occupy `n * repeat_size + (n - 1) * gap`, so the largest `n` is
/// `floor((bound + gap) / (repeat_size + gap))`. Non-positive tiles, negative
/// gaps and non-finite input cannot be tiled and give 0.
pub fn capacity(repeat_size: f64, gap: f64, bound: f64) -> usize {
    if !(repeat_size.is_finite() && gap.is_finite() && bound.is_finite()) {
        return 0;
    }
    if repeat_size <= 0.0 || gap < 0.0 {
        return 0;
    }
    let count = ((bound + gap) / (repeat_size + gap)).floor();
    if count <= 0.0 { 0 } else { count as usize }
}

/// Clusters that fit across the bed width
pub fn horizontal_capacity(params: &JobParameters) -> usize {
    capacity(
        params.frame_width_mm * 2.0,
        params.cluster_gap_mm,
        inch_to_mm(params.bed_width_in),
    )
}

/// Cluster rows that fit within the bed height
pub fn vertical_capacity(params: &JobParameters) -> usize {
    capacity(
        params.frame_height_mm * 2.0,
        params.row_gap_mm,
        inch_to_mm(params.bed_height_in),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_fit_counts() {
        // 3 × 100 + 2 × 10 = 320
        assert_eq!(capacity(100.0, 10.0, 320.0), 3);
        assert_eq!(capacity(100.0, 10.0, 319.9), 2);
        assert_eq!(capacity(100.0, 0.0, 300.0), 3);
    }

    #[test]
    fn test_smaller_than_one_tile() {
        assert_eq!(capacity(100.0, 10.0, 99.0), 0);
        assert_eq!(capacity(100.0, 10.0, 0.0), 0);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(capacity(0.0, 10.0, 1000.0), 0);
        assert_eq!(capacity(-5.0, 10.0, 1000.0), 0);
        assert_eq!(capacity(100.0, -1.0, 1000.0), 0);
        assert_eq!(capacity(f64::NAN, 0.0, 1000.0), 0);
        assert_eq!(capacity(100.0, 0.0, f64::INFINITY), 0);
    }

    #[test]
    fn test_never_overflows_bound() {
        for repeat in [1.0, 7.5, 33.3, 360.0, 480.0] {
            for gap in [0.0, 0.1, 15.0, 25.0] {
                for bound in [0.0, 10.0, 735.0, 1219.2, 2438.4] {
                    let n = capacity(repeat, gap, bound);
                    let used = n as f64 * repeat + n.saturating_sub(1) as f64 * gap;
                    assert!(used <= bound + 1e-9, "{repeat} {gap} {bound} -> {n}");
                    // One more tile would not fit
                    let more = (n + 1) as f64 * repeat + n as f64 * gap;
                    assert!(more > bound - 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_default_job_capacity() {
        let params = JobParameters::default();
        // 96" bed = 2438.4mm, cluster 360mm + 15mm gap
        assert_eq!(horizontal_capacity(&params), 6);
        // 48" bed = 1219.2mm, cluster 480mm + 25mm gap
        assert_eq!(vertical_capacity(&params), 2);
    }
}
