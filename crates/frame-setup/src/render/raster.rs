//! Raster fallback for the logo
//!
//! When the logo page cannot be embedded as vector content it is rendered to
//! pixels, oriented at the pixel level and placed as an Image XObject.

use crate::layout::Rect;
use crate::types::{LogoAsset, Result};
use image::{DynamicImage, RgbaImage, imageops};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// Renders the first page of a logo PDF to pixels
pub trait LogoRasterizer: Send + Sync {
    fn rasterize(&self, logo: &LogoAsset, dpi: f64) -> Result<RgbaImage>;
}

/// Rasterizer used when no rendering backend is available
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableRasterizer;

impl LogoRasterizer for UnavailableRasterizer {
    fn rasterize(&self, _logo: &LogoAsset, _dpi: f64) -> Result<RgbaImage> {
        Err(crate::types::FrameError::Raster(
            "no raster backend is available in this build".to_string(),
        ))
    }
}

#[cfg(feature = "raster")]
pub use pdfium::PdfiumRasterizer;

#[cfg(feature = "raster")]
mod pdfium {
    use super::LogoRasterizer;
    use crate::types::{FrameError, LogoAsset, Result};
    use image::RgbaImage;
    use pdfium_render::prelude::*;
    use std::path::PathBuf;

    /// Rasterizer backed by the Pdfium library
    ///
    /// The library is bound per call, trying `library_dir` (or
    /// `vendor/pdfium/lib` under the working directory) before the system
    /// library.
    #[derive(Debug, Clone, Default)]
    pub struct PdfiumRasterizer {
        pub library_dir: Option<PathBuf>,
    }

    impl PdfiumRasterizer {
        pub fn new(library_dir: Option<PathBuf>) -> Self {
            Self { library_dir }
        }

        fn bind(&self) -> std::result::Result<Pdfium, PdfiumError> {
            let vendor_path = self.library_dir.clone().or_else(|| {
                std::env::current_dir().ok().and_then(|mut p| {
                    p.push("vendor/pdfium/lib");
                    if p.exists() { Some(p) } else { None }
                })
            });

            if let Some(vendor_path) = vendor_path {
                if let Ok(binding) = Pdfium::bind_to_library(
                    Pdfium::pdfium_platform_library_name_at_path(&vendor_path),
                ) {
                    return Ok(Pdfium::new(binding));
                }
            }

            Pdfium::bind_to_system_library().map(Pdfium::new)
        }
    }

    impl LogoRasterizer for PdfiumRasterizer {
        fn rasterize(&self, logo: &LogoAsset, dpi: f64) -> Result<RgbaImage> {
            let raster_err = |e: PdfiumError| FrameError::Raster(e.to_string());

            let pdfium = self.bind().map_err(raster_err)?;
            let document = pdfium
                .load_pdf_from_byte_slice(&logo.pdf_bytes, None)
                .map_err(raster_err)?;
            let page = document.pages().get(0).map_err(raster_err)?;

            let config = PdfRenderConfig::new().scale_page_by_factor((dpi / 72.0) as f32);
            let bitmap = page.render_with_config(&config).map_err(raster_err)?;

            let width = bitmap.width() as u32;
            let height = bitmap.height() as u32;
            let rgba_data = bitmap.as_rgba_bytes().to_vec();

            RgbaImage::from_raw(width, height, rgba_data).ok_or_else(|| {
                FrameError::Raster(format!(
                    "rendered bitmap does not match its {}x{} size",
                    width, height
                ))
            })
        }
    }
}

// =============================================================================
// Pixel Orientation
// =============================================================================

/// Mirror an image left to right into a new buffer
pub fn mirror_horizontal(image: &RgbaImage) -> RgbaImage {
    imageops::flip_horizontal(image)
}

/// Turn an image half a revolution into a new buffer
pub fn rotate_half_turn(image: &RgbaImage) -> RgbaImage {
    imageops::rotate180(image)
}

/// Apply the logo orientation flags: horizontal flip first, then half turn
pub fn orient_raster(image: &RgbaImage, mirror: bool, rotate_180: bool) -> RgbaImage {
    let mirrored = if mirror {
        mirror_horizontal(image)
    } else {
        image.clone()
    };
    if rotate_180 {
        rotate_half_turn(&mirrored)
    } else {
        mirrored
    }
}

// =============================================================================
// Image XObject
// =============================================================================

/// Add an RGB Image XObject holding `image` to the output document.
///
/// Transparent pixels are flattened onto white.
pub fn create_image_xobject(output: &mut Document, image: &RgbaImage) -> ObjectId {
    let rgb = flatten_onto_white(image);

    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"XObject".to_vec()));
    dict.set("Subtype", Object::Name(b"Image".to_vec()));
    dict.set("Width", Object::Integer(rgb.width() as i64));
    dict.set("Height", Object::Integer(rgb.height() as i64));
    dict.set("ColorSpace", Object::Name(b"DeviceRGB".to_vec()));
    dict.set("BitsPerComponent", Object::Integer(8));

    output.add_object(Stream::new(dict, rgb.into_raw()))
}

fn flatten_onto_white(image: &RgbaImage) -> image::RgbImage {
    let mut flattened = image.clone();
    for pixel in flattened.pixels_mut() {
        let alpha = pixel[3] as u32;
        for channel in 0..3 {
            let value = pixel[channel] as u32;
            pixel[channel] = ((value * alpha + 255 * (255 - alpha)) / 255) as u8;
        }
        pixel[3] = 255;
    }
    DynamicImage::ImageRgba8(flattened).into_rgb8()
}

/// Content operations drawing an image XObject into a rectangle
pub fn image_placement_command(xobject_name: &str, rect: &Rect) -> String {
    format!(
        "q {} 0 0 {} {} {} cm /{} Do Q\n",
        rect.width, rect.height, rect.x, rect.y, xobject_name
    )
}
