use std::path::PathBuf;

use thiserror::Error;

/// Why a sample could not be turned into a raster or annotation.
///
/// Both kinds are recoverable: the walker logs them and moves on.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("cannot open {path}: {source}")]
    PathNotResolved {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("corrupt data in {path}: {reason}")]
    CorruptData { path: PathBuf, reason: String },
}

impl DecodeError {
    pub fn corrupt(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::CorruptData {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::PathNotResolved { path, .. } | Self::CorruptData { path, .. } => path,
        }
    }
}
