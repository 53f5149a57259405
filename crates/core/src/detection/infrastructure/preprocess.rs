use image::{GrayImage, ImageBuffer, Rgb};
use imageproc::contrast::equalize_histogram;

use crate::shared::raster::Raster;

/// Grayscale copy of `raster` with its histogram equalized.
///
/// Detectors always search this working copy; the color raster is left
/// untouched for drawing.
pub fn equalized_grayscale(raster: &Raster) -> Result<Raster, Box<dyn std::error::Error>> {
    let gray: GrayImage = match raster.channels() {
        1 => GrayImage::from_raw(raster.width(), raster.height(), raster.data().to_vec())
            .ok_or("raster data does not match its dimensions")?,
        3 => {
            let rgb = ImageBuffer::<Rgb<u8>, &[u8]>::from_raw(
                raster.width(),
                raster.height(),
                raster.data(),
            )
            .ok_or("raster data does not match its dimensions")?;
            image::imageops::grayscale(&rgb)
        }
        n => return Err(format!("unsupported channel count {n}").into()),
    };
    Ok(Raster::from_gray(equalize_histogram(&gray)))
}
