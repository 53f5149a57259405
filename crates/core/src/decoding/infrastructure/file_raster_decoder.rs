use std::fs::File;
use std::io::{self, BufReader, ErrorKind, Read};
use std::path::Path;

use bzip2::read::BzDecoder;

use crate::decoding::domain::annotation_record::AnnotationRecord;
use crate::decoding::domain::decode_error::DecodeError;
use crate::decoding::domain::raster_decoder::{RasterDecoder, RasterEncoding};
use crate::shared::raster::Raster;

/// Decodes sample files from the local file system with the `image` crate.
///
/// Bzip2 archives are decompressed in a single forward pass before the
/// bitmap codec sees them, so no temporary file is written.
pub struct FileRasterDecoder;

impl FileRasterDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileRasterDecoder {
    fn default() -> Self {
        Self::new()
    }
}

fn unresolved(path: &Path, source: io::Error) -> DecodeError {
    DecodeError::PathNotResolved {
        path: path.to_path_buf(),
        source,
    }
}

/// Decodes an in-memory bitmap, recognising the format by content.
pub fn decode_bitmap(bytes: &[u8], path: &Path) -> Result<Raster, DecodeError> {
    let image = image::load_from_memory(bytes).map_err(|e| DecodeError::corrupt(path, e))?;
    Ok(Raster::from_rgb(image.to_rgb8()))
}

/// Decompresses a bzip2 stream and decodes the bitmap inside it.
///
/// `source` is consumed front to back without seeking, so pipes work as
/// well as files. `path` only labels errors. Nothing is returned unless the
/// whole stream decompressed and decoded cleanly.
pub fn decode_bzip2_stream<R: Read>(source: R, path: &Path) -> Result<Raster, DecodeError> {
    let mut decoder = BzDecoder::new(BufReader::new(source));
    let mut bytes = Vec::new();
    decoder.read_to_end(&mut bytes).map_err(|e| match e.kind() {
        ErrorKind::InvalidData | ErrorKind::InvalidInput | ErrorKind::UnexpectedEof => {
            DecodeError::corrupt(path, format!("bzip2: {e}"))
        }
        _ => unresolved(path, e),
    })?;
    decode_bitmap(&bytes, path)
}

impl RasterDecoder for FileRasterDecoder {
    fn decode(&self, path: &Path, encoding: RasterEncoding) -> Result<Raster, DecodeError> {
        match encoding {
            RasterEncoding::Bitmap => {
                let bytes = std::fs::read(path).map_err(|e| unresolved(path, e))?;
                decode_bitmap(&bytes, path)
            }
            RasterEncoding::Bzip2Bitmap => {
                let file = File::open(path).map_err(|e| unresolved(path, e))?;
                decode_bzip2_stream(file, path)
            }
        }
    }

    fn decode_annotation(&self, path: &Path) -> Result<AnnotationRecord, DecodeError> {
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::InvalidData => DecodeError::corrupt(path, "annotation is not UTF-8"),
            _ => unresolved(path, e),
        })?;
        text.parse().map_err(|e| DecodeError::corrupt(path, e))
    }
}
