use crate::shared::raster::Raster;

/// Where annotated rasters end up.
///
/// `window` names the output surface; `sample_path` is the sample's path
/// relative to the dataset root.
pub trait RasterDisplay: Send {
    fn show(
        &mut self,
        window: &str,
        sample_path: &str,
        raster: &Raster,
    ) -> Result<(), Box<dyn std::error::Error>>;
}
