use std::path::{Path, PathBuf};

use crate::display::domain::raster_display::RasterDisplay;
use crate::shared::raster::Raster;

/// Saves each annotated raster as a PNG under an output directory,
/// mirroring the dataset layout: `<out>/<sample path>.png`.
pub struct ImageFileDisplay {
    output_dir: PathBuf,
}

impl ImageFileDisplay {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn target_path(&self, sample_path: &str) -> PathBuf {
        self.output_dir.join(format!("{sample_path}.png"))
    }
}

fn write_png(path: &Path, raster: &Raster) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    match raster.channels() {
        3 => image::RgbImage::from_raw(raster.width(), raster.height(), raster.data().to_vec())
            .ok_or("Failed to create image from raster data")?
            .save(path)?,
        1 => image::GrayImage::from_raw(raster.width(), raster.height(), raster.data().to_vec())
            .ok_or("Failed to create image from raster data")?
            .save(path)?,
        n => return Err(format!("cannot save a {n}-channel raster").into()),
    }
    Ok(())
}

impl RasterDisplay for ImageFileDisplay {
    fn show(
        &mut self,
        window: &str,
        sample_path: &str,
        raster: &Raster,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let path = self.target_path(sample_path);
        write_png(&path, raster)?;
        log::debug!("[{window}] {sample_path} -> {}", path.display());
        Ok(())
    }
}
