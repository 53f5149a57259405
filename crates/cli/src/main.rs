use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use facescan_core::dataset::domain::dataset::Dataset;
use facescan_core::dataset::domain::feret_filter::{write_csv, FeretFilter, Inclusion};
use facescan_core::dataset::infrastructure::feret_ground_truth_scanner::select_feret_images;
use facescan_core::decoding::infrastructure::file_raster_decoder::FileRasterDecoder;
use facescan_core::detection::domain::detection_params::DetectionParams;
use facescan_core::detection::infrastructure::rustface_region_detector::{
    DetectorUnavailable, RustfaceRegionDetector,
};
use facescan_core::display::domain::raster_display::RasterDisplay;
use facescan_core::display::infrastructure::image_file_display::ImageFileDisplay;
use facescan_core::display::infrastructure::log_display::LogDisplay;
use facescan_core::overlay::hierarchical_overlay_engine::HierarchicalOverlayEngine;
use facescan_core::overlay::infrastructure::outline_painter::OutlinePainter;
use facescan_core::pipeline::dataset_walker::DatasetWalker;
use facescan_core::pipeline::walk_logger::LogWalkLogger;
use facescan_core::shared::constants::{
    DEFAULT_MIN_NEIGHBORS, DEFAULT_SCALE_FACTOR, DEFAULT_WINDOW_NAME,
};

/// Face and eye detection over public face-image datasets.
#[derive(Parser)]
#[command(name = "facescan")]
struct Cli {
    /// Dataset layout: cmu, feret, inria or ncku.
    dataset: Dataset,

    /// Dataset root directory.
    root: PathBuf,

    /// SeetaFace model used for the face pass.
    #[arg(long)]
    face_model: PathBuf,

    /// SeetaFace model used for the eye pass inside each face.
    #[arg(long)]
    eye_model: PathBuf,

    /// Write annotated images here instead of only logging them.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Ratio between successive detection scales (> 1.0).
    #[arg(long, default_value_t = DEFAULT_SCALE_FACTOR)]
    scale_factor: f64,

    /// Overlapping hits required per detection. Checked but not used by the
    /// SeetaFace backend, which merges overlapping hits itself.
    #[arg(long, default_value_t = DEFAULT_MIN_NEIGHBORS)]
    min_neighbors: u32,

    /// Name of the output window.
    #[arg(long, default_value = DEFAULT_WINDOW_NAME)]
    window: String,

    /// Log progress every N identifiers.
    #[arg(long, default_value = "100")]
    progress_every: usize,

    /// FERET only: comma-separated genders to keep (Male, Female).
    #[arg(long, value_delimiter = ',')]
    genders: Option<Vec<String>>,

    /// FERET only: comma-separated poses to keep (fa fb pl hl ql pr hr qr ra rb rc rd re).
    #[arg(long, value_delimiter = ',')]
    poses: Option<Vec<String>>,

    /// FERET only: keep images by glasses (any, yes, no).
    #[arg(long)]
    glasses: Option<Inclusion>,

    /// FERET only: keep images by beard (any, yes, no).
    #[arg(long)]
    beard: Option<Inclusion>,

    /// FERET only: keep images by mustache (any, yes, no).
    #[arg(long)]
    mustache: Option<Inclusion>,

    /// FERET only: also write the selected `xml path,image path` pairs here.
    #[arg(long)]
    selection_csv: Option<PathBuf>,
}

impl Cli {
    /// Ground-truth filter for a FERET walk, if any filter option was given.
    fn feret_filter(&self) -> Option<FeretFilter> {
        let requested = self.genders.is_some()
            || self.poses.is_some()
            || self.glasses.is_some()
            || self.beard.is_some()
            || self.mustache.is_some()
            || self.selection_csv.is_some();
        if !requested {
            return None;
        }

        let mut filter = FeretFilter::default();
        if let Some(genders) = &self.genders {
            filter.genders = genders.clone();
        }
        if let Some(poses) = &self.poses {
            filter.poses = poses.clone();
        }
        filter.glasses = self.glasses.unwrap_or(filter.glasses);
        filter.beard = self.beard.unwrap_or(filter.beard);
        filter.mustache = self.mustache.unwrap_or(filter.mustache);
        Some(filter)
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let mut walker = build_walker(&cli)?;
    let report = match cli.feret_filter() {
        Some(filter) => {
            let selections = select_feret_images(&cli.root, &filter)?;
            log::info!("{} FERET images match {filter}", selections.len());
            if let Some(csv) = &cli.selection_csv {
                write_csv(&selections, BufWriter::new(File::create(csv)?))?;
                log::info!("Selection written to {}", csv.display());
            }
            walker.walk_selection(&cli.root, &selections)
        }
        None => walker.walk(cli.dataset, &cli.root),
    };
    log::info!("{} dataset: {report}", cli.dataset);

    Ok(())
}

/// Loads both detector models and wires the walk. Fails before anything is
/// walked if either model cannot be loaded.
fn build_walker(cli: &Cli) -> Result<DatasetWalker, Box<dyn std::error::Error>> {
    let params = DetectionParams::new(cli.scale_factor, cli.min_neighbors);
    let engine = HierarchicalOverlayEngine::new(
        Box::new(RustfaceRegionDetector::load(&cli.face_model)?),
        Box::new(RustfaceRegionDetector::load(&cli.eye_model)?),
        Box::new(OutlinePainter::new()),
        params,
    );

    let display: Box<dyn RasterDisplay> = match &cli.output {
        Some(dir) => Box::new(ImageFileDisplay::new(dir)),
        None => Box::new(LogDisplay::new()),
    };

    Ok(DatasetWalker::new(
        Box::new(FileRasterDecoder::new()),
        engine,
        display,
        Box::new(LogWalkLogger::new(cli.progress_every)),
        cli.window.clone(),
    ))
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.root.is_dir() {
        return Err(format!("Dataset root not found: {}", cli.root.display()).into());
    }
    for model in [&cli.face_model, &cli.eye_model] {
        if !model.is_file() {
            return Err(format!("Detector model not found: {}", model.display()).into());
        }
    }
    DetectionParams::new(cli.scale_factor, cli.min_neighbors).validate()?;
    if let Some(output) = &cli.output {
        if output.exists() && !output.is_dir() {
            return Err(format!("Output is not a directory: {}", output.display()).into());
        }
    }
    if cli.window.trim().is_empty() {
        return Err("Window name must not be empty".into());
    }
    if cli.dataset != Dataset::Feret && cli.feret_filter().is_some() {
        return Err(
            format!("Ground-truth filters only apply to feret, not {}", cli.dataset).into(),
        );
    }
    Ok(())
}
