use crate::shared::rect::{ImageSpace, Rect};

/// One top-level region and the nested regions found inside it, all in
/// full-image coordinates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetectionResult {
    pub face: Rect<ImageSpace>,
    pub eyes: Vec<Rect<ImageSpace>>,
}

impl DetectionResult {
    pub fn new(face: Rect<ImageSpace>) -> Self {
        Self {
            face,
            eyes: Vec::new(),
        }
    }
}
