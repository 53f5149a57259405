use std::str::FromStr;

use thiserror::Error;

use crate::shared::rect::{ImageSpace, Rect};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnnotationParseError {
    #[error("expected 6 fields, found {0}")]
    FieldCount(usize),
    #[error("field {field} is not an unsigned integer: {value:?}")]
    NotUnsigned { field: &'static str, value: String },
    #[error("box centred at ({x}, {y}) with size {width}x{height} exceeds the coordinate range")]
    OutOfRange {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
}

/// Ground-truth face box shipped next to an INRIA image.
///
/// `(x, y)` is the centre of the box, not its corner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnnotationRecord {
    pub name: String,
    pub label: String,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl AnnotationRecord {
    /// Corner-based box: `(x - w/2, y - h/2)` to `(x + w/2, y + h/2)`.
    ///
    /// Parsed records always fit; hand-built ones saturate at the `i32`
    /// bounds.
    pub fn bounding_box(&self) -> Rect<ImageSpace> {
        let [x1, y1, x2, y2] = self.corners().unwrap_or_else(|| {
            let (x, y) = (saturate(self.x), saturate(self.y));
            let (half_w, half_h) = (saturate(self.width / 2), saturate(self.height / 2));
            [
                x.saturating_sub(half_w),
                y.saturating_sub(half_h),
                x.saturating_add(half_w),
                y.saturating_add(half_h),
            ]
        });
        Rect::from_corners(x1, y1, x2, y2)
    }

    /// `[x1, y1, x2, y2]`, or `None` when a corner leaves `i32`.
    fn corners(&self) -> Option<[i32; 4]> {
        let x = i32::try_from(self.x).ok()?;
        let y = i32::try_from(self.y).ok()?;
        let half_w = i32::try_from(self.width / 2).ok()?;
        let half_h = i32::try_from(self.height / 2).ok()?;
        let (x1, x2) = (x.checked_sub(half_w)?, x.checked_add(half_w)?);
        let (y1, y2) = (y.checked_sub(half_h)?, y.checked_add(half_h)?);
        Some([x1, y1, x2, y2])
    }
}

fn saturate(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn unsigned(field: &'static str, value: &str) -> Result<u32, AnnotationParseError> {
    value
        .parse()
        .map_err(|_| AnnotationParseError::NotUnsigned {
            field,
            value: value.to_string(),
        })
}

impl FromStr for AnnotationRecord {
    type Err = AnnotationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        let [name, label, x, y, width, height] = tokens.as_slice() else {
            return Err(AnnotationParseError::FieldCount(tokens.len()));
        };
        let record = Self {
            name: name.to_string(),
            label: label.to_string(),
            x: unsigned("x", x)?,
            y: unsigned("y", y)?,
            width: unsigned("width", width)?,
            height: unsigned("height", height)?,
        };
        if record.corners().is_none() {
            return Err(AnnotationParseError::OutOfRange {
                x: record.x,
                y: record.y,
                width: record.width,
                height: record.height,
            });
        }
        Ok(record)
    }
}
