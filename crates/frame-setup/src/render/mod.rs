//! PDF rendering modules
//!
//! This module handles all PDF-specific operations:
//! - Building the single-page output documents
//! - Stroking frame outlines
//! - Creating the logo Form XObject and its transformation matrices
//! - Rasterizing the logo when vector embedding fails
//! - Deep copying PDF objects

mod outline;
mod page;
mod raster;
mod transform;
mod xobject;

pub use outline::{OutlineStyle, generate_outlines};
pub use page::{PageBuilder, page_size};
pub use raster::*;
pub use transform::{cm_operator, logo_transform, orientation};
pub use xobject::{LogoForm, copy_object_deep, create_logo_xobject, get_page_dimensions};
