use crate::overlay::domain::marker_style::MarkerStyle;
use crate::shared::raster::Raster;
use crate::shared::rect::{ImageSpace, Rect};

/// Domain interface for marking regions on a color raster.
///
/// Implementations draw in place; parts of a region outside the raster are
/// clipped.
pub trait RegionPainter: Send {
    fn paint(
        &self,
        raster: &mut Raster,
        regions: &[Rect<ImageSpace>],
        style: &MarkerStyle,
    ) -> Result<(), Box<dyn std::error::Error>>;
}
