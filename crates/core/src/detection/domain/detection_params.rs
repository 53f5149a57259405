use crate::shared::constants::{DEFAULT_MIN_NEIGHBORS, DEFAULT_SCALE_FACTOR};

/// Multi-scale search settings shared by the face and eye passes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectionParams {
    /// Ratio between successive search scales. Must be greater than 1.
    pub scale_factor: f64,
    /// Overlapping hits a candidate needs before it is reported.
    pub min_neighbors: u32,
}

impl DetectionParams {
    pub fn new(scale_factor: f64, min_neighbors: u32) -> Self {
        Self {
            scale_factor,
            min_neighbors,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(self.scale_factor.is_finite() && self.scale_factor > 1.0) {
            return Err(format!(
                "scale factor must be greater than 1.0, got {}",
                self.scale_factor
            ));
        }
        Ok(())
    }
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self::new(DEFAULT_SCALE_FACTOR, DEFAULT_MIN_NEIGHBORS)
    }
}
