use std::path::Path;

use crate::decoding::domain::annotation_record::AnnotationRecord;
use crate::decoding::domain::decode_error::DecodeError;
use crate::shared::raster::Raster;

/// How a sample file is stored on disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RasterEncoding {
    /// A bitmap the codec recognises by content (PGM, PPM, JPEG, PNG).
    Bitmap,
    /// A bitmap wrapped in a bzip2 stream.
    Bzip2Bitmap,
}

/// Turns sample files into color rasters and ground-truth records.
pub trait RasterDecoder: Send {
    /// Decodes the file at `path` into a 3-channel RGB raster.
    ///
    /// Grayscale sources are expanded to three channels.
    fn decode(&self, path: &Path, encoding: RasterEncoding) -> Result<Raster, DecodeError>;

    /// Reads a whitespace-delimited `(name, label, x, y, w, h)` record.
    fn decode_annotation(&self, path: &Path) -> Result<AnnotationRecord, DecodeError>;
}
