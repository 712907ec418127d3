pub mod colors;
pub mod compose;
pub mod constants;
pub mod layout;
mod options;
pub mod render;
mod stats;
mod types;

pub use compose::{
    ProgressCallback, default_rasterizer, generate, generate_blocking, load_logo, save_pdf,
};
pub use options::*;
pub use stats::calculate_statistics;
pub use types::*;
