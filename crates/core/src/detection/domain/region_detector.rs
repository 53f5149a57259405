use ndarray::ArrayView2;

use crate::detection::domain::detection_params::DetectionParams;
use crate::shared::rect::{LocalSpace, Rect};

/// Domain interface for finding regions (faces, eyes) in a grayscale window.
///
/// `gray` may be a crop of a larger image; returned rectangles are relative
/// to the window's own origin. Implementations may keep state between
/// calls, hence `&mut self`.
pub trait RegionDetector: Send {
    fn detect(
        &mut self,
        gray: ArrayView2<'_, u8>,
        params: &DetectionParams,
    ) -> Result<Vec<Rect<LocalSpace>>, Box<dyn std::error::Error>>;
}
