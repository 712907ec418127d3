//! Layout calculation modules
//!
//! This module handles all the geometric calculations for a frame run:
//! - Bed capacity (how many clusters fit across and up the bed)
//! - Matte geometry (margins, opening and logo band of one frame)
//! - Grid layout (every frame slot and the page size)
//! - Logo placement (destination rectangle and orientation per frame)

mod capacity;
mod grid;
mod matte;
mod placement;
mod types;

pub use capacity::*;
pub use grid::*;
pub use matte::*;
pub use placement::*;
pub use types::*;
