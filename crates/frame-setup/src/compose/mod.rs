//! Frame run generation
//!
//! This module orchestrates one job:
//! 1. Validate the parameters and build the grid layout
//! 2. Stroke every frame into the outline document
//! 3. Place the logo into every active frame of the artwork document
//! 4. Write each requested document once it is complete

mod artwork;
mod io;
mod outlines;

pub use artwork::{ArtworkRender, PlacementOutcome, render_artwork};
pub use io::{load_logo, save_pdf};
pub use outlines::render_outlines;

use crate::constants::{
    PROGRESS_ARTWORK, PROGRESS_DONE, PROGRESS_RASTER_FALLBACK, PROGRESS_START,
};
use crate::layout::{PlacementSpec, build_layout, resolve_logo_placements};
use crate::options::JobParameters;
use crate::render::LogoRasterizer;
use crate::types::*;
use io::write_document;
use std::sync::Arc;

/// Progress callback receiving a percentage and a short message
pub type ProgressCallback = Box<dyn FnMut(u8, &str) + Send>;

/// Generate the requested documents for a job
pub async fn generate(
    params: &JobParameters,
    logo: LogoAsset,
    rasterizer: Arc<dyn LogoRasterizer>,
    progress: Option<ProgressCallback>,
) -> Result<ExportResult> {
    let params = params.clone();
    let mut progress = progress;

    tokio::task::spawn_blocking(move || {
        let mut forward = |percent: u8, message: &str| {
            if let Some(callback) = progress.as_mut() {
                callback(percent, message);
            }
        };
        let report: &mut dyn FnMut(u8, &str) = &mut forward;
        generate_blocking(&params, &logo, rasterizer.as_ref(), Some(report))
    })
    .await?
}

/// Synchronous generation; every file is written only after its document is
/// complete, so a failed stage leaves nothing of its own behind
pub fn generate_blocking(
    params: &JobParameters,
    logo: &LogoAsset,
    rasterizer: &dyn LogoRasterizer,
    progress: Option<&mut dyn FnMut(u8, &str)>,
) -> Result<ExportResult> {
    let mut progress = Progress::new(progress);

    params.validate()?;
    if params.export_artwork && !logo.has_size() {
        return Err(FrameError::Config(
            "Artwork export requires a logo with a non-empty first page".to_string(),
        ));
    }

    progress.report(PROGRESS_START, "Preparing outlines");
    let layout = build_layout(params);
    log::info!(
        "Job '{}': {} frames ({} active) on a {:.1} x {:.1} pt page",
        params.job_name,
        layout.placements.len(),
        layout.active_count(),
        layout.page_width,
        layout.page_height
    );

    let mut result = ExportResult::default();

    if params.export_outlines {
        let path = params.outline_path();
        write_document(render_outlines(&layout, params), &path)?;
        log::info!("Outlines written to {}", path.display());
        result.outline_path = Some(path);
    }

    progress.report(PROGRESS_ARTWORK, "Preparing artwork");

    if params.export_artwork {
        let (logo_width_mm, logo_height_mm) = logo.size_mm();
        log::debug!(
            "Logo '{}' is {:.1} x {:.1} mm",
            logo.name,
            logo_width_mm,
            logo_height_mm
        );
        let spec = PlacementSpec::from_params(params, logo);
        let placements = resolve_logo_placements(&layout, &spec);
        if placements.is_empty() {
            log::warn!("No visible matte band for the logo; artwork page will be empty");
        }

        let fallback = params.allow_raster_fallback.then_some(rasterizer);
        let render = render_artwork(&layout, &placements, logo, fallback, &mut |_| {
            progress.report_fallback();
        })?;

        let logos = render.outcomes.len();
        let rasterized = render.rasterized_count();
        let path = params.artwork_path();
        write_document(render.document, &path)?;
        log::info!(
            "Artwork written to {} ({} logos, {} rasterized)",
            path.display(),
            logos,
            rasterized
        );
        result.artwork_path = Some(path);
    }

    progress.report(PROGRESS_DONE, "Finished");
    Ok(result)
}

/// The rasterizer used when the caller does not supply one
#[cfg(feature = "raster")]
pub fn default_rasterizer() -> Arc<dyn LogoRasterizer> {
    Arc::new(crate::render::PdfiumRasterizer::default())
}

/// The rasterizer used when the caller does not supply one
#[cfg(not(feature = "raster"))]
pub fn default_rasterizer() -> Arc<dyn LogoRasterizer> {
    Arc::new(crate::render::UnavailableRasterizer)
}

struct Progress<'a> {
    callback: Option<&'a mut dyn FnMut(u8, &str)>,
    fallback_reported: bool,
}

impl<'a> Progress<'a> {
    fn new(callback: Option<&'a mut dyn FnMut(u8, &str)>) -> Self {
        Self {
            callback,
            fallback_reported: false,
        }
    }

    fn report(&mut self, percent: u8, message: &str) {
        log::debug!("[{:>3}%] {}", percent, message);
        if let Some(callback) = self.callback.as_mut() {
            callback(percent, message);
        }
    }

    fn report_fallback(&mut self) {
        if !self.fallback_reported {
            self.fallback_reported = true;
            self.report(
                PROGRESS_RASTER_FALLBACK,
                "Vector placement failed - rasterising logo",
            );
        }
    }
}
