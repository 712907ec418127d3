//! Layout data types
//!
//! These types carry the geometry between the grid and matte calculations
//! and PDF rendering. Page-space values are in points with the origin at the
//! lower-left corner of the page.

/// A rectangular area in points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f64,
    /// Y position (bottom edge)
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of the given size centred on a point
    pub fn centered(center_x: f64, center_y: f64, width: f64, height: f64) -> Self {
        Self::new(
            center_x - width / 2.0,
            center_y - height / 2.0,
            width,
            height,
        )
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Top edge y coordinate
    pub fn top(&self) -> f64 {
        self.y + self.height
    }

    /// Center x coordinate
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Center y coordinate
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }
}

/// Which half of a cluster a frame sits in
///
/// The two halves mirror each other across the cluster's horizontal seam,
/// so the bottom half faces the seam with its top edge and the top half
/// with its bottom edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameRow {
    /// Lower half of the cluster (row 0)
    Bottom,
    /// Upper half of the cluster (row 1)
    Top,
}

impl FrameRow {
    pub const ALL: [FrameRow; 2] = [FrameRow::Bottom, FrameRow::Top];

    pub fn index(self) -> usize {
        match self {
            FrameRow::Bottom => 0,
            FrameRow::Top => 1,
        }
    }
}

/// One physical frame slot on the bed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramePlacement {
    /// Cluster position along the bed width
    pub cluster_index: usize,
    /// Cluster row, counted up from the bottom of the bed
    pub cluster_row: usize,
    /// Half of the cluster this frame belongs to
    pub row: FrameRow,
    /// Column within the cluster (0 = left, 1 = right)
    pub column: usize,
    /// Frame bounds in points
    pub rect: Rect,
    /// Whether this slot is within the requested frame quantity
    pub active: bool,
    /// 1-based creation order
    pub sequence_index: usize,
}

/// Complete frame arrangement for one job
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub page_width: f64,
    pub page_height: f64,
    pub frame_width: f64,
    pub frame_height: f64,
    pub cluster_gap: f64,
    pub row_gap: f64,
    pub cluster_count: usize,
    pub cluster_row_count: usize,
    pub placements: Vec<FramePlacement>,
}

impl Layout {
    pub fn cluster_width(&self) -> f64 {
        self.frame_width * 2.0
    }

    pub fn cluster_height(&self) -> f64 {
        self.frame_height * 2.0
    }

    /// Horizontal extent of all clusters including the gaps between them
    pub fn content_width(&self) -> f64 {
        span(self.cluster_count, self.cluster_width(), self.cluster_gap)
    }

    /// Vertical extent of all cluster rows including the gaps between them
    pub fn content_height(&self) -> f64 {
        span(self.cluster_row_count, self.cluster_height(), self.row_gap)
    }

    pub fn active_placements(&self) -> impl Iterator<Item = &FramePlacement> {
        self.placements.iter().filter(|p| p.active)
    }

    pub fn active_count(&self) -> usize {
        self.active_placements().count()
    }
}

/// Length of `count` repeats of `size` separated by `gap`
pub fn span(count: usize, size: f64, gap: f64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    count as f64 * size + (count - 1) as f64 * gap
}

/// Matte border and opening of a frame, in millimeters
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MatteGeometry {
    pub bottom_margin_mm: f64,
    pub top_margin_mm: f64,
    pub side_margin_mm: f64,
    pub opening_width_mm: f64,
    pub opening_height_mm: f64,
    /// Height available for centring a logo, measured from the seam-facing edge
    pub visible_band_mm: f64,
}

impl MatteGeometry {
    pub fn has_opening(&self) -> bool {
        self.opening_width_mm > 0.0 && self.opening_height_mm > 0.0
    }
}

/// Where and how the logo is drawn for one active frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogoPlacement {
    /// Sequence index of the frame this logo belongs to
    pub sequence_index: usize,
    /// Destination rectangle in points (logo native size)
    pub rect: Rect,
    /// Mirror horizontally
    pub mirror: bool,
    /// Rotate by 180°
    pub rotate_180: bool,
}
