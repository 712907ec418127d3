//! Matte geometry
//!
//! The indent is a safety margin on every side of a frame. The matte total
//! height is measured from the bottom edge and may exceed what is left of
//! the frame, in which case the opening is clamped (possibly to nothing)
//! instead of failing.

use super::MatteGeometry;

/// Derive the matte margins, opening and visible logo band of a frame.
///
/// All inputs are in millimeters; negative values are treated as zero.
pub fn calculate_matte_geometry(
    frame_width_mm: f64,
    frame_height_mm: f64,
    indent_mm: f64,
    matte_total_mm: f64,
) -> MatteGeometry {
    let frame_width_mm = frame_width_mm.max(0.0);
    let frame_height_mm = frame_height_mm.max(0.0);
    let indent_mm = indent_mm.max(0.0);
    let matte_total_mm = matte_total_mm.max(0.0);

    let bottom_margin_mm = indent_mm.min(frame_height_mm / 2.0);
    let max_opening_height = (frame_height_mm - bottom_margin_mm).max(0.0);
    let opening_height_mm = matte_total_mm.min(max_opening_height).max(0.0);
    let top_margin_mm = (frame_height_mm - bottom_margin_mm - opening_height_mm).max(0.0);

    let side_margin_mm = indent_mm.min(frame_width_mm / 2.0);
    let opening_width_mm = (frame_width_mm - 2.0 * side_margin_mm).max(0.0);

    let visible_band_mm = (matte_total_mm - bottom_margin_mm).max(0.0);

    MatteGeometry {
        bottom_margin_mm,
        top_margin_mm,
        side_margin_mm,
        opening_width_mm,
        opening_height_mm,
        visible_band_mm,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-6, "{} != {}", a, b);
    }

    #[test]
    fn test_standard_frame() {
        let matte = calculate_matte_geometry(180.0, 240.0, 10.0, 120.0);
        assert_close(matte.bottom_margin_mm, 10.0);
        assert_close(matte.opening_height_mm, 120.0);
        assert_close(matte.top_margin_mm, 110.0);
        assert_close(matte.visible_band_mm, 110.0);
        assert_close(matte.side_margin_mm, 10.0);
        assert_close(matte.opening_width_mm, 160.0);
        assert!(matte.has_opening());
    }

    #[test]
    fn test_matte_taller_than_frame() {
        let matte = calculate_matte_geometry(180.0, 240.0, 10.0, 500.0);
        assert_close(matte.opening_height_mm, 230.0);
        assert_close(matte.top_margin_mm, 0.0);
        // The band is not clamped to the frame; placement does that
        assert_close(matte.visible_band_mm, 490.0);
    }

    #[test]
    fn test_indent_larger_than_frame() {
        let matte = calculate_matte_geometry(40.0, 60.0, 100.0, 50.0);
        assert_close(matte.bottom_margin_mm, 30.0);
        assert_close(matte.side_margin_mm, 20.0);
        assert_close(matte.opening_width_mm, 0.0);
        assert_close(matte.opening_height_mm, 30.0);
        assert_close(matte.visible_band_mm, 20.0);
        assert!(!matte.has_opening());
    }

    #[test]
    fn test_matte_within_indent_has_no_band() {
        let matte = calculate_matte_geometry(180.0, 240.0, 10.0, 5.0);
        assert_close(matte.visible_band_mm, 0.0);
        assert_close(matte.opening_height_mm, 5.0);
    }

    #[test]
    fn test_negative_inputs_clamped() {
        let matte = calculate_matte_geometry(-10.0, -10.0, -1.0, -1.0);
        assert_eq!(matte, MatteGeometry::default());
    }

    #[test]
    fn test_heights_always_sum_to_frame() {
        for height in [0.0, 1.0, 59.5, 240.0, 1000.0] {
            for indent in [0.0, 3.0, 10.0, 400.0] {
                for matte_total in [0.0, 20.0, 120.0, 5000.0] {
                    let m = calculate_matte_geometry(180.0, height, indent, matte_total);
                    assert_close(
                        m.bottom_margin_mm + m.opening_height_mm + m.top_margin_mm,
                        height,
                    );
                    assert!(m.opening_width_mm >= 0.0);
                    assert!(m.opening_height_mm <= height);
                }
            }
        }
    }
}
