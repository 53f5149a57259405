use crate::display::domain::raster_display::RasterDisplay;
use crate::shared::raster::Raster;

/// Reports each raster through the log and keeps nothing.
#[derive(Default)]
pub struct LogDisplay;

impl LogDisplay {
    pub fn new() -> Self {
        Self
    }
}

impl RasterDisplay for LogDisplay {
    fn show(
        &mut self,
        window: &str,
        sample_path: &str,
        raster: &Raster,
    ) -> Result<(), Box<dyn std::error::Error>> {
        log::info!(
            "[{window}] {sample_path} ({}x{})",
            raster.width(),
            raster.height()
        );
        Ok(())
    }
}
