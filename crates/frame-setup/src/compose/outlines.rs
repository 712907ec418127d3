//! Outline document

use crate::constants::mm_to_pt;
use crate::layout::Layout;
use crate::options::JobParameters;
use crate::render::{OutlineStyle, PageBuilder, generate_outlines};
use lopdf::Document;

/// Build the outline page: every frame rectangle stroked, active or not
pub fn render_outlines(layout: &Layout, params: &JobParameters) -> Document {
    let style = OutlineStyle {
        color: params.outline_color,
        width_pt: mm_to_pt(params.outline_thickness_mm),
    };

    let mut page = PageBuilder::new(layout.page_width, layout.page_height);
    page.push_content(generate_outlines(&layout.placements, &style));

    log::debug!(
        "Stroked {} frame outlines at {:.3}pt",
        layout.placements.len(),
        style.width_pt
    );

    page.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::build_layout;
    use crate::render::page_size;

    #[test]
    fn test_outline_page_matches_layout() {
        let params = JobParameters {
            cluster_count: 2,
            frame_quantity: 5,
            ..JobParameters::default()
        };
        let layout = build_layout(&params);
        let doc = render_outlines(&layout, &params);

        assert_eq!(
            page_size(&doc),
            Some((layout.page_width as f32, layout.page_height as f32))
        );

        let page_id = *doc.get_pages().values().next().unwrap();
        let content = doc.get_page_content(page_id).unwrap();
        let text = String::from_utf8(content).unwrap();
        assert_eq!(text.matches(" re S").count(), 8);
    }
}
