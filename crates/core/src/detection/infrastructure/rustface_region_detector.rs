use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use ndarray::ArrayView2;
use thiserror::Error;

use crate::detection::domain::detection_params::DetectionParams;
use crate::detection::domain::region_detector::RegionDetector;
use crate::shared::rect::{LocalSpace, Rect};

/// Smallest window, in pixels, the SeetaFace cascade can scan.
pub const MIN_WINDOW_SIZE: u32 = 20;
const SCORE_THRESHOLD: f64 = 2.0;
const WINDOW_STEP: u32 = 4;

#[derive(Error, Debug)]
#[error("detector model {path} could not be loaded: {source}")]
pub struct DetectorUnavailable {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Image-pyramid step for a multi-scale `scale_factor`.
///
/// The cascade shrinks the image by this ratio between levels; it only
/// accepts ratios inside `[0.01, 0.99]`.
pub fn pyramid_step(scale_factor: f64) -> f32 {
    (1.0 / scale_factor).clamp(0.01, 0.99) as f32
}

/// Region detector backed by a SeetaFace model file loaded through `rustface`.
///
/// The model is read once; a fresh cascade is built from it per call since
/// the cascade itself is not `Send`. SeetaFace merges overlapping hits on
/// its own, so `min_neighbors` is not forwarded.
pub struct RustfaceRegionDetector {
    model: rustface::Model,
}

impl RustfaceRegionDetector {
    pub fn load(path: &Path) -> Result<Self, DetectorUnavailable> {
        let unavailable = |source| DetectorUnavailable {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(unavailable)?;
        let model = rustface::read_model(BufReader::new(file)).map_err(unavailable)?;
        log::info!("Loaded detector model {}", path.display());
        Ok(Self { model })
    }
}

impl RegionDetector for RustfaceRegionDetector {
    fn detect(
        &mut self,
        gray: ArrayView2<'_, u8>,
        params: &DetectionParams,
    ) -> Result<Vec<Rect<LocalSpace>>, Box<dyn std::error::Error>> {
        let (height, width) = gray.dim();
        let (width, height) = (width as u32, height as u32);
        if width < MIN_WINDOW_SIZE || height < MIN_WINDOW_SIZE {
            return Ok(Vec::new());
        }

        // crops are strided views; the cascade wants packed rows
        let packed = gray.as_standard_layout();
        let pixels = packed
            .as_slice()
            .ok_or("grayscale window is not contiguous")?;

        let mut detector = rustface::create_detector_with_model(self.model.clone());
        detector.set_min_face_size(MIN_WINDOW_SIZE);
        detector.set_score_thresh(SCORE_THRESHOLD);
        detector.set_pyramid_scale_factor(pyramid_step(params.scale_factor));
        detector.set_slide_window_step(WINDOW_STEP, WINDOW_STEP);

        let faces = detector.detect(&rustface::ImageData::new(pixels, width, height));
        Ok(faces
            .iter()
            .map(|face| {
                let bbox = face.bbox();
                Rect::new(bbox.x(), bbox.y(), bbox.width() as i32, bbox.height() as i32)
            })
            .collect())
    }
}
