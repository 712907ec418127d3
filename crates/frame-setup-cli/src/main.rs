mod logger;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use frame_setup::colors::{DEFAULT_COLOR_NAME, PRESET_COLORS, resolve_preset};
use frame_setup::{JobParameters, PageHeight, Rgb};
use logger::CliLogger;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "fsetup", about = "Frame outline and artwork PDF generator", version)]
struct Cli {
    /// Log layout and rendering details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the outline and artwork PDFs for a frame run
    Generate {
        #[command(flatten)]
        job: JobArgs,

        /// Logo PDF placed in every active frame
        #[arg(short, long)]
        logo: Option<PathBuf>,

        /// Directory the PDFs are written to
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Only write the outline PDF
        #[arg(long, conflicts_with = "artwork_only")]
        outlines_only: bool,

        /// Only write the artwork PDF
        #[arg(long)]
        artwork_only: bool,

        /// Rasterize the logo for frames where vector placement fails
        #[arg(long)]
        raster_fallback: bool,

        /// Directory holding the Pdfium library used for rasterizing
        #[arg(long)]
        pdfium_dir: Option<PathBuf>,
    },

    /// Show bed capacity and usage without writing PDFs
    Stats {
        #[command(flatten)]
        job: JobArgs,
    },

    /// Write a job file with default settings
    InitConfig {
        /// Output JSON file
        #[arg(short, long, default_value = "job.json")]
        output: PathBuf,

        /// Job name used for the output file names
        #[arg(long)]
        job_name: Option<String>,
    },
}

/// Job settings; anything not given falls back to the job file, then the defaults
#[derive(Args)]
struct JobArgs {
    /// Job file written by `init-config`
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Job name used for the output file names
    #[arg(long)]
    job_name: Option<String>,

    /// Frame width in mm
    #[arg(long)]
    frame_width: Option<f64>,

    /// Frame height in mm
    #[arg(long)]
    frame_height: Option<f64>,

    /// Safety indent on every side of a frame in mm
    #[arg(long)]
    indent: Option<f64>,

    /// Total matte height measured from the frame's bottom edge in mm
    #[arg(long)]
    matte: Option<f64>,

    /// Gap between clusters in mm
    #[arg(long)]
    cluster_gap: Option<f64>,

    /// Gap between cluster rows in mm
    #[arg(long)]
    row_gap: Option<f64>,

    /// Bed width in inches
    #[arg(long)]
    bed_width: Option<f64>,

    /// Bed height in inches
    #[arg(long)]
    bed_height: Option<f64>,

    /// Clusters across the bed
    #[arg(long)]
    clusters: Option<usize>,

    /// Cluster rows up the bed
    #[arg(long)]
    rows: Option<usize>,

    /// Frames that receive a logo
    #[arg(short, long)]
    quantity: Option<usize>,

    /// Outline color preset
    #[arg(long, conflicts_with = "color_hex")]
    color: Option<String>,

    /// Outline color as #RRGGBB
    #[arg(long)]
    color_hex: Option<String>,

    /// Outline stroke thickness in mm
    #[arg(long)]
    outline: Option<f64>,

    /// Mirror every logo for reverse printing
    #[arg(long)]
    flip: bool,

    /// Keep bottom-row logos upright
    #[arg(long)]
    no_rotate_bottom: bool,

    /// Size the page to the cluster rows instead of the whole bed
    #[arg(long)]
    single_row_page: bool,
}

impl JobArgs {
    async fn into_params(self) -> Result<JobParameters> {
        let mut params = match &self.config {
            Some(path) => JobParameters::load(path)
                .await
                .with_context(|| format!("Failed to load job file {}", path.display()))?,
            None => JobParameters::default(),
        };

        if let Some(job_name) = self.job_name {
            params = params.with_job_name(job_name);
        }

        let lengths = [
            (self.frame_width, &mut params.frame_width_mm),
            (self.frame_height, &mut params.frame_height_mm),
            (self.indent, &mut params.indent_mm),
            (self.matte, &mut params.matte_total_height_mm),
            (self.cluster_gap, &mut params.cluster_gap_mm),
            (self.row_gap, &mut params.row_gap_mm),
            (self.bed_width, &mut params.bed_width_in),
            (self.bed_height, &mut params.bed_height_in),
            (self.outline, &mut params.outline_thickness_mm),
        ];
        for (value, field) in lengths {
            if let Some(value) = value {
                *field = value;
            }
        }

        if let Some(clusters) = self.clusters {
            params.cluster_count = clusters;
        }
        if let Some(rows) = self.rows {
            params.cluster_row_count = rows;
        }
        if let Some(quantity) = self.quantity {
            params.frame_quantity = quantity;
        }

        if let Some(name) = &self.color {
            params.outline_color = resolve_preset(name)?;
        }
        if let Some(hex) = &self.color_hex {
            params.outline_color = Rgb::from_hex(hex)?;
        }

        params.flip_in_app |= self.flip;
        if self.no_rotate_bottom {
            params.rotate_bottom_row = false;
        }
        if self.single_row_page {
            params.page_height = PageHeight::ClusterBand;
        }

        Ok(params)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    CliLogger::new(cli.verbose).init()?;

    match cli.command {
        Commands::Generate {
            job,
            logo,
            output_dir,
            outlines_only,
            artwork_only,
            raster_fallback,
            pdfium_dir,
        } => {
            let mut params = job.into_params().await?;
            if let Some(output_dir) = output_dir {
                params.output_directory = output_dir;
            }
            if outlines_only {
                params.export_artwork = false;
            }
            if artwork_only {
                params.export_outlines = false;
            }
            params.allow_raster_fallback |= raster_fallback;
            params.validate()?;

            let logo = match logo {
                Some(path) => frame_setup::load_logo(&path)
                    .await
                    .with_context(|| format!("Failed to load logo {}", path.display()))?,
                None if params.export_artwork => {
                    bail!("A logo PDF is required for artwork (use --logo or --outlines-only)")
                }
                None => frame_setup::LogoAsset::placeholder(),
            };

            let rasterizer = rasterizer(pdfium_dir);
            let progress: frame_setup::ProgressCallback = Box::new(|percent: u8, message: &str| {
                println!("[{:>3}%] {}", percent, message);
            });

            let generated = frame_setup::generate(&params, logo, rasterizer, Some(progress)).await;
            let result = match generated {
                Ok(result) => result,
                Err(err) => {
                    if err.suggests_raster_fallback() {
                        eprintln!("Hint: re-run with --raster-fallback to rasterize the logo");
                    }
                    return Err(err.into());
                }
            };

            if let Some(path) = result.outline_path {
                println!("Outlines → {}", path.display());
            }
            if let Some(path) = result.artwork_path {
                println!("Artwork → {}", path.display());
            }
        }

        Commands::Stats { job } => {
            let params = job.into_params().await?;
            let stats = frame_setup::calculate_statistics(&params);

            println!("Layout Statistics:");
            println!(
                "  Capacity: {} cluster(s) across, {} row(s) up",
                stats.horizontal_capacity, stats.vertical_capacity
            );
            println!(
                "  Frames: {} total, {} with logo",
                stats.total_frames, stats.active_frames
            );
            println!(
                "  Used width: {:.1} / {:.1} mm ({:.0}%)",
                stats.used_width_mm,
                stats.bed_width_mm,
                stats.width_usage() * 100.0
            );
            println!(
                "  Used height: {:.1} / {:.1} mm ({:.0}%)",
                stats.used_height_mm,
                stats.bed_height_mm,
                stats.height_usage() * 100.0
            );
            println!(
                "  Matte: bottom {:.1}, opening {:.1} x {:.1}, top {:.1}, side {:.1} mm",
                stats.matte.bottom_margin_mm,
                stats.matte.opening_width_mm,
                stats.matte.opening_height_mm,
                stats.matte.top_margin_mm,
                stats.matte.side_margin_mm
            );
            println!("  Visible logo band: {:.1} mm", stats.matte.visible_band_mm);
            println!(
                "  Logos: {}, bottom row {}",
                if stats.mirrored_logos { "mirrored" } else { "as drawn" },
                if stats.rotated_bottom_logos { "rotated 180°" } else { "upright" }
            );
            if stats.overflows_bed() {
                println!("  Warning: the selected clusters do not fit on the bed");
            }

            if let Err(err) = params.validate() {
                println!("  Invalid job: {}", err);
            }
        }

        Commands::InitConfig { output, job_name } => {
            let mut params = JobParameters::default();
            if let Some(job_name) = job_name {
                params = params.with_job_name(job_name);
            }
            params.save(&output).await?;

            let presets: Vec<_> = PRESET_COLORS.iter().map(|p| p.name).collect();
            println!("Wrote default job → {}", output.display());
            println!(
                "Outline color: {} (presets: {})",
                DEFAULT_COLOR_NAME,
                presets.join(", ")
            );
        }
    }

    Ok(())
}

fn rasterizer(pdfium_dir: Option<PathBuf>) -> Arc<dyn frame_setup::render::LogoRasterizer> {
    match pdfium_dir {
        Some(dir) => Arc::new(frame_setup::render::PdfiumRasterizer::new(Some(dir))),
        None => frame_setup::default_rasterizer(),
    }
}
