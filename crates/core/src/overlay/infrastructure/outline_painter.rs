use image::{ImageBuffer, Rgb};
use imageproc::drawing::draw_hollow_rect_mut;

use crate::overlay::domain::marker_style::MarkerStyle;
use crate::overlay::domain::region_painter::RegionPainter;
use crate::shared::raster::Raster;
use crate::shared::rect::{ImageSpace, Rect};

/// Draws hollow rectangles with `imageproc`, straight into the raster's
/// own buffer.
///
/// A region `(x, y, w, h)` gets corners `(x, y)` and `(x + w, y + h)`, both
/// inclusive. Each extra unit of thickness adds a ring one pixel further in.
pub struct OutlinePainter;

impl OutlinePainter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for OutlinePainter {
    fn default() -> Self {
        Self::new()
    }
}

/// Ring `inset` pixels inside `region`, with edges lying outside a
/// `canvas_width` x `canvas_height` canvas pulled to one pixel past its border.
fn ring(
    region: &Rect<ImageSpace>,
    inset: i64,
    canvas_width: u32,
    canvas_height: u32,
) -> Option<imageproc::rect::Rect> {
    let x1 = i64::from(region.x) + inset;
    let y1 = i64::from(region.y) + inset;
    let x2 = i64::from(region.x) + i64::from(region.width) - inset;
    let y2 = i64::from(region.y) + i64::from(region.height) - inset;
    if x2 < x1 || y2 < y1 {
        return None;
    }

    let pull = |v: i64, limit: u32| v.clamp(-1, i64::from(limit)) as i32;
    let (x1, x2) = (pull(x1, canvas_width), pull(x2, canvas_width));
    let (y1, y2) = (pull(y1, canvas_height), pull(y2, canvas_height));
    Some(
        imageproc::rect::Rect::at(x1, y1)
            .of_size((x2 - x1 + 1) as u32, (y2 - y1 + 1) as u32),
    )
}

impl RegionPainter for OutlinePainter {
    fn paint(
        &self,
        raster: &mut Raster,
        regions: &[Rect<ImageSpace>],
        style: &MarkerStyle,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if raster.channels() != 3 {
            return Err(format!("cannot draw on a {}-channel raster", raster.channels()).into());
        }
        let (width, height) = (raster.width(), raster.height());
        let mut canvas = ImageBuffer::<Rgb<u8>, &mut [u8]>::from_raw(width, height, raster.data_mut())
            .ok_or("raster data does not match its dimensions")?;

        let color = Rgb(style.color);
        for region in regions {
            for inset in 0..i64::from(style.thickness) {
                if let Some(rect) = ring(region, inset, width, height) {
                    draw_hollow_rect_mut(&mut canvas, rect, color);
                }
            }
        }
        Ok(())
    }
}
