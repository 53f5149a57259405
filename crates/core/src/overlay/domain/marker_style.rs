use crate::shared::constants::MARKER_THICKNESS;

/// Color and line thickness of a rectangle outline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarkerStyle {
    pub color: [u8; 3],
    pub thickness: u32,
}

/// Top-level regions (faces).
pub const PRIMARY: MarkerStyle = MarkerStyle {
    color: [255, 0, 0],
    thickness: MARKER_THICKNESS,
};

/// Nested regions (eyes).
pub const SECONDARY: MarkerStyle = MarkerStyle {
    color: [0, 255, 0],
    thickness: MARKER_THICKNESS,
};

/// Annotated ground truth.
pub const GROUND_TRUTH: MarkerStyle = MarkerStyle {
    color: [0, 0, 255],
    thickness: MARKER_THICKNESS,
};
