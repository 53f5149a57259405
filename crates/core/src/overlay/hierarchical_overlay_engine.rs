use ndarray::s;

use crate::detection::domain::detection_params::DetectionParams;
use crate::detection::domain::detection_result::DetectionResult;
use crate::detection::domain::region_detector::RegionDetector;
use crate::detection::infrastructure::preprocess::equalized_grayscale;
use crate::overlay::domain::marker_style::{MarkerStyle, PRIMARY, SECONDARY};
use crate::overlay::domain::region_painter::RegionPainter;
use crate::shared::raster::Raster;
use crate::shared::rect::{ImageSpace, Rect};

/// Two-level detection and drawing: faces on the whole image, then eyes
/// inside each face.
///
/// Detection runs on an equalized grayscale working copy. Faces are clipped
/// to the image, eyes are searched in a view of the face crop and moved
/// back into image coordinates before drawing. The detector handles live as
/// long as the engine and are reused for every sample.
pub struct HierarchicalOverlayEngine {
    face_detector: Box<dyn RegionDetector>,
    eye_detector: Box<dyn RegionDetector>,
    painter: Box<dyn RegionPainter>,
    params: DetectionParams,
}

impl HierarchicalOverlayEngine {
    pub fn new(
        face_detector: Box<dyn RegionDetector>,
        eye_detector: Box<dyn RegionDetector>,
        painter: Box<dyn RegionPainter>,
        params: DetectionParams,
    ) -> Self {
        Self {
            face_detector,
            eye_detector,
            painter,
            params,
        }
    }

    /// Finds faces and their eyes without touching `raster`.
    ///
    /// Faces keep the face detector's order; faces lying entirely outside
    /// the image are dropped.
    pub fn detect(
        &mut self,
        raster: &Raster,
    ) -> Result<Vec<DetectionResult>, Box<dyn std::error::Error>> {
        let equalized = equalized_grayscale(raster)?;
        let gray = equalized
            .as_gray_view()
            .ok_or("equalized working copy is not single-channel")?;
        let full = Rect::full(raster.width(), raster.height());

        let faces = self.face_detector.detect(gray, &self.params)?;
        let mut results = Vec::with_capacity(faces.len());
        for face in faces {
            let Some(face) = face.to_image_space(&full).clamp_to(raster.width(), raster.height())
            else {
                continue;
            };
            let crop = gray.slice(s![
                face.y as usize..face.bottom() as usize,
                face.x as usize..face.right() as usize
            ]);
            let eyes = self.eye_detector.detect(crop, &self.params)?;

            let mut result = DetectionResult::new(face);
            result.eyes = eyes.into_iter().map(|eye| eye.to_image_space(&face)).collect();
            results.push(result);
        }
        Ok(results)
    }

    /// Draws each face with the primary style followed by its eyes with the
    /// secondary style.
    pub fn render(
        &self,
        raster: &mut Raster,
        results: &[DetectionResult],
    ) -> Result<(), Box<dyn std::error::Error>> {
        for result in results {
            self.painter.paint(raster, &[result.face], &PRIMARY)?;
            self.painter.paint(raster, &result.eyes, &SECONDARY)?;
        }
        Ok(())
    }

    /// Draws arbitrary image-space regions, e.g. annotated ground truth.
    pub fn mark(
        &self,
        raster: &mut Raster,
        regions: &[Rect<ImageSpace>],
        style: &MarkerStyle,
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.painter.paint(raster, regions, style)
    }

    /// Detects and draws in one pass, handing back the same raster.
    ///
    /// Not idempotent: a second pass searches an image that already carries
    /// the first pass's outlines and draws on top of them.
    pub fn annotate(&mut self, raster: Raster) -> Result<Raster, Box<dyn std::error::Error>> {
        self.annotate_with_results(raster).map(|(raster, _)| raster)
    }

    /// [`annotate`](Self::annotate), also returning what was drawn.
    pub fn annotate_with_results(
        &mut self,
        mut raster: Raster,
    ) -> Result<(Raster, Vec<DetectionResult>), Box<dyn std::error::Error>> {
        let results = self.detect(&raster)?;
        self.render(&mut raster, &results)?;
        Ok((raster, results))
    }
}
