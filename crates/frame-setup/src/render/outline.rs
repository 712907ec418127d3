//! Frame outline rendering
//!
//! Generates the PDF content stream operations that stroke every frame
//! rectangle of a layout.

use crate::layout::FramePlacement;
use crate::types::Rgb;

/// Stroke style for frame outlines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineStyle {
    pub color: Rgb,
    /// Line width in points
    pub width_pt: f64,
}

/// Generate the outline operations for all placements, active or not
pub fn generate_outlines(placements: &[FramePlacement], style: &OutlineStyle) -> String {
    let mut ops = String::new();

    ops.push_str("q\n");
    ops.push_str(&format!(
        "{} {} {} RG\n",
        style.color.r, style.color.g, style.color.b
    ));
    ops.push_str(&format!("{} w\n", style.width_pt));
    ops.push_str("[] 0 d\n");

    for placement in placements {
        let rect = &placement.rect;
        ops.push_str(&format!(
            "{} {} {} {} re S\n",
            rect.x, rect.y, rect.width, rect.height
        ));
    }

    ops.push_str("Q\n");

    ops
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{GridSpec, create_grid_layout};
    use crate::types::PageHeight;

    #[test]
    fn test_one_rectangle_per_frame() {
        let layout = create_grid_layout(&GridSpec {
            frame_width: 100.0,
            frame_height: 50.0,
            cluster_gap: 0.0,
            row_gap: 0.0,
            cluster_count: 2,
            cluster_row_count: 1,
            frame_quantity: 1,
            bed_width: 500.0,
            bed_height: 500.0,
            page_height: PageHeight::Bed,
        });
        let style = OutlineStyle {
            color: Rgb::new(1.0, 0.0, 0.5),
            width_pt: 1.5,
        };

        let ops = generate_outlines(&layout.placements, &style);
        assert_eq!(ops.matches(" re S").count(), 8);
        assert!(ops.contains("1 0 0.5 RG"));
        assert!(ops.contains("1.5 w"));
        assert!(ops.contains("200 50 100 50 re S"));
        assert!(ops.starts_with("q\n") && ops.ends_with("Q\n"));
    }
}
