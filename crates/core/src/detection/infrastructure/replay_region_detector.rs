use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use ndarray::ArrayView2;

use crate::detection::domain::detection_params::DetectionParams;
use crate::detection::domain::region_detector::RegionDetector;
use crate::shared::rect::{LocalSpace, Rect};

/// Replays scripted detections, one response per call, in call order.
///
/// Once the script runs out every further call finds nothing. The
/// `(height, width)` of each searched window is recorded and can be read
/// back through [`ReplayRegionDetector::windows`].
pub struct ReplayRegionDetector {
    responses: VecDeque<Vec<Rect<LocalSpace>>>,
    windows: Arc<Mutex<Vec<(usize, usize)>>>,
}

impl ReplayRegionDetector {
    pub fn new(responses: Vec<Vec<Rect<LocalSpace>>>) -> Self {
        Self {
            responses: responses.into(),
            windows: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A detector that never finds anything.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Shared handle to the window sizes seen so far.
    pub fn windows(&self) -> Arc<Mutex<Vec<(usize, usize)>>> {
        Arc::clone(&self.windows)
    }
}

impl RegionDetector for ReplayRegionDetector {
    fn detect(
        &mut self,
        gray: ArrayView2<'_, u8>,
        _params: &DetectionParams,
    ) -> Result<Vec<Rect<LocalSpace>>, Box<dyn std::error::Error>> {
        self.windows
            .lock()
            .map_err(|_| "replay window log poisoned")?
            .push(gray.dim());
        Ok(self.responses.pop_front().unwrap_or_default())
    }
}
