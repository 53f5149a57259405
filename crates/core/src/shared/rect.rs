use std::marker::PhantomData;

/// Coordinates relative to the full decoded image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageSpace;

/// Coordinates relative to the window a detector was run on.
///
/// For a top-level pass the window is the whole image; for a nested pass
/// it is the crop of one top-level region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LocalSpace;

/// Axis-aligned rectangle tagged with the coordinate space it lives in.
///
/// Width and height are never negative. Moving a rectangle between spaces
/// goes through [`Rect::to_image_space`]; there is no implicit conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rect<S> {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    space: PhantomData<S>,
}

impl<S> Rect<S> {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width: width.max(0),
            height: height.max(0),
            space: PhantomData,
        }
    }

    /// Rectangle spanning two corners, `(x1, y1)` top-left and `(x2, y2)`
    /// bottom-right.
    pub fn from_corners(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self::new(x1, y1, x2.saturating_sub(x1), y2.saturating_sub(y1))
    }

    /// Exclusive right edge, saturating at `i32::MAX`.
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge, saturating at `i32::MAX`.
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Intersection with `[0, width) x [0, height)` in this rectangle's
    /// own space. `None` when nothing is left.
    pub fn clamp_to(&self, width: u32, height: u32) -> Option<Rect<S>> {
        let x1 = self.x.max(0);
        let y1 = self.y.max(0);
        let x2 = self.right().min(i32::try_from(width).unwrap_or(i32::MAX));
        let y2 = self.bottom().min(i32::try_from(height).unwrap_or(i32::MAX));
        if x2 <= x1 || y2 <= y1 {
            return None;
        }
        Some(Rect::from_corners(x1, y1, x2, y2))
    }
}

impl Rect<ImageSpace> {
    /// The whole image as a search window.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width as i32, height as i32)
    }
}

impl Rect<LocalSpace> {
    /// Shifts a window-relative rectangle by the window's origin.
    pub fn to_image_space(self, window: &Rect<ImageSpace>) -> Rect<ImageSpace> {
        Rect::new(
            self.x.saturating_add(window.x),
            self.y.saturating_add(window.y),
            self.width,
            self.height,
        )
    }
}
