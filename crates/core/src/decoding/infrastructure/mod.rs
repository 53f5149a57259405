pub mod file_raster_decoder;
