//! Logo transformation matrices
//!
//! The logo is moved so its own centre sits on the origin, scaled to fit the
//! destination while keeping its aspect ratio, optionally mirrored and/or
//! turned half a revolution, and finally moved onto the destination centre.

use crate::layout::{LogoPlacement, Rect};
use kurbo::{Affine, Vec2};

/// Build the form-space → page-space matrix for one logo placement.
///
/// `bbox` is the logo form's bounding box. Returns `None` when either
/// rectangle has no area, since such a logo cannot be placed.
pub fn logo_transform(bbox: &Rect, placement: &LogoPlacement) -> Option<Affine> {
    let dest = &placement.rect;
    if !has_area(bbox) || !has_area(dest) {
        return None;
    }

    let scale = (dest.width / bbox.width).min(dest.height / bbox.height);
    let to_origin = Affine::translate(Vec2::new(-bbox.center_x(), -bbox.center_y()));
    let to_dest = Affine::translate(Vec2::new(dest.center_x(), dest.center_y()));

    Some(
        to_dest
            * orientation(placement.mirror, placement.rotate_180)
            * Affine::scale(scale)
            * to_origin,
    )
}

/// Mirror and half-turn as independent ±1 scale factors.
///
/// Mirroring negates x; a 180° rotation negates both axes.
pub fn orientation(mirror: bool, rotate_180: bool) -> Affine {
    let mut sx = 1.0;
    let mut sy = 1.0;
    if mirror {
        sx = -sx;
    }
    if rotate_180 {
        sx = -sx;
        sy = -sy;
    }
    Affine::scale_non_uniform(sx, sy)
}

/// PDF `cm` operator for a matrix
pub fn cm_operator(affine: &Affine) -> String {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    format!("{} {} {} {} {} {} cm", a, b, c, d, e, f)
}

fn has_area(rect: &Rect) -> bool {
    rect.width.is_finite() && rect.height.is_finite() && rect.width > 0.0 && rect.height > 0.0
}
