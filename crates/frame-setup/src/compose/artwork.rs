//! Artwork document
//!
//! Each logo placement is first drawn from a Form XObject built out of the
//! logo's first page. A placement whose vector embedding fails is rasterized
//! instead when a rasterizer is supplied; otherwise the whole render fails.

use crate::constants::{LOGO_XOBJECT_NAME, RASTER_DPI};
use crate::layout::{Layout, LogoPlacement};
use crate::render::{
    LogoForm, LogoRasterizer, PageBuilder, cm_operator, create_image_xobject,
    create_logo_xobject, image_placement_command, logo_transform, orient_raster,
};
use crate::types::*;
use image::RgbaImage;
use lopdf::{Document, ObjectId};
use std::collections::HashMap;

/// How one logo placement ended up on the page
#[derive(Debug, Clone, PartialEq)]
pub enum PlacementOutcome {
    /// Drawn from the vector Form XObject
    Embedded,
    /// Drawn from a rasterized copy of the logo
    Rasterized,
    /// Not drawn at all
    Failed {
        vector: String,
        raster: Option<String>,
    },
}

/// The artwork page together with the outcome of every placement
#[derive(Debug)]
pub struct ArtworkRender {
    pub document: Document,
    pub outcomes: Vec<(usize, PlacementOutcome)>,
}

impl ArtworkRender {
    pub fn rasterized_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| *outcome == PlacementOutcome::Rasterized)
            .count()
    }
}

/// Build the artwork page.
///
/// `fallback` enables the raster path; `on_fallback` is called with the
/// sequence index of every placement that needs it. The first placement that
/// can be drawn neither way aborts the render with
/// [`FrameError::ArtworkEmbed`].
pub fn render_artwork(
    layout: &Layout,
    placements: &[LogoPlacement],
    logo: &LogoAsset,
    fallback: Option<&dyn LogoRasterizer>,
    on_fallback: &mut dyn FnMut(usize),
) -> Result<ArtworkRender> {
    let mut page = PageBuilder::new(layout.page_width, layout.page_height);

    let form = if placements.is_empty() {
        None
    } else {
        Some(prepare_logo_form(&mut page, logo))
    };
    if let Some(Err(reason)) = &form {
        log::warn!("Logo '{}' cannot be embedded as vector: {}", logo.name, reason);
    }

    let mut raster = RasterCache::default();
    let mut outcomes = Vec::with_capacity(placements.len());

    for placement in placements {
        let vector = match &form {
            Some(Ok(form)) => draw_vector(&mut page, form, placement),
            Some(Err(reason)) => Err(reason.clone()),
            None => Err("logo form was not prepared".to_string()),
        };

        let outcome = match vector {
            Ok(()) => PlacementOutcome::Embedded,
            Err(vector) => match fallback {
                Some(rasterizer) => {
                    on_fallback(placement.sequence_index);
                    match raster.draw(&mut page, rasterizer, logo, placement) {
                        Ok(()) => {
                            log::warn!(
                                "Frame {}: vector embedding failed ({}), logo rasterized",
                                placement.sequence_index,
                                vector
                            );
                            PlacementOutcome::Rasterized
                        }
                        Err(reason) => PlacementOutcome::Failed {
                            vector,
                            raster: Some(reason),
                        },
                    }
                }
                None => PlacementOutcome::Failed {
                    vector,
                    raster: None,
                },
            },
        };

        if let PlacementOutcome::Failed { vector, raster } = outcome {
            return Err(FrameError::ArtworkEmbed {
                sequence_index: placement.sequence_index,
                vector,
                raster,
            });
        }
        outcomes.push((placement.sequence_index, outcome));
    }

    log::debug!("Placed {} logos on the artwork page", outcomes.len());

    Ok(ArtworkRender {
        document: page.finish(),
        outcomes,
    })
}

/// Copy the logo's first page into the output as a Form XObject
fn prepare_logo_form(
    page: &mut PageBuilder,
    logo: &LogoAsset,
) -> std::result::Result<LogoForm, String> {
    let source = Document::load_mem(&logo.pdf_bytes).map_err(|e| e.to_string())?;
    let mut cache = HashMap::new();
    let form = create_logo_xobject(&mut page.document, &source, &mut cache)
        .map_err(|e| e.to_string())?;
    page.add_xobject(LOGO_XOBJECT_NAME, form.id);
    Ok(form)
}

fn draw_vector(
    page: &mut PageBuilder,
    form: &LogoForm,
    placement: &LogoPlacement,
) -> std::result::Result<(), String> {
    let transform = logo_transform(&form.bbox, placement)
        .ok_or_else(|| "logo or destination has no area".to_string())?;
    page.push_content(format!(
        "q {} /{} Do Q\n",
        cm_operator(&transform),
        LOGO_XOBJECT_NAME
    ));
    Ok(())
}

// =============================================================================
// Raster Fallback
// =============================================================================

/// Renders the logo at most once and keeps one image XObject per orientation
#[derive(Default)]
struct RasterCache {
    base: Option<std::result::Result<RgbaImage, String>>,
    images: HashMap<(bool, bool), String>,
}

impl RasterCache {
    fn draw(
        &mut self,
        page: &mut PageBuilder,
        rasterizer: &dyn LogoRasterizer,
        logo: &LogoAsset,
        placement: &LogoPlacement,
    ) -> std::result::Result<(), String> {
        let key = (placement.mirror, placement.rotate_180);
        let name = match self.images.get(&key).cloned() {
            Some(name) => name,
            None => {
                let base = self.base.get_or_insert_with(|| {
                    log::info!("Rasterizing logo '{}' at {} DPI", logo.name, RASTER_DPI);
                    rasterizer
                        .rasterize(logo, RASTER_DPI)
                        .map_err(|e| e.to_string())
                });
                let image = match base {
                    Ok(image) => orient_raster(image, placement.mirror, placement.rotate_180),
                    Err(reason) => return Err(reason.clone()),
                };
                let id: ObjectId = create_image_xobject(&mut page.document, &image);
                let name = raster_xobject_name(placement.mirror, placement.rotate_180);
                page.add_xobject(&name, id);
                self.images.insert(key, name.clone());
                name
            }
        };

        page.push_content(image_placement_command(&name, &placement.rect));
        Ok(())
    }
}

fn raster_xobject_name(mirror: bool, rotate_180: bool) -> String {
    format!("{}Raster{}{}", LOGO_XOBJECT_NAME, mirror as u8, rotate_180 as u8)
}
