use std::fmt;

use crate::dataset::domain::cmu_grammar::CmuSample;
use crate::dataset::domain::dataset::Dataset;
use crate::dataset::domain::feret_grammar::{FeretImage, FeretSubject};
use crate::dataset::domain::inria_grammar::InriaSample;
use crate::dataset::domain::ncku_grammar::NckuSample;
use crate::dataset::domain::path_grammar::{GrammarError, PathGrammar};
use crate::decoding::domain::raster_decoder::RasterEncoding;

/// A sample identifier tagged with the dataset whose grammar it follows.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SampleId {
    Cmu(CmuSample),
    /// A FERET subject directory; expands into [`SampleId::Feret`] images
    /// once listed.
    FeretSubject(FeretSubject),
    Feret(FeretImage),
    Inria(InriaSample),
    Ncku(NckuSample),
}

impl SampleId {
    pub fn dataset(&self) -> Dataset {
        match self {
            Self::Cmu(_) => Dataset::Cmu,
            Self::FeretSubject(_) | Self::Feret(_) => Dataset::Feret,
            Self::Inria(_) => Dataset::Inria,
            Self::Ncku(_) => Dataset::Ncku,
        }
    }

    /// Path relative to the dataset root.
    pub fn relative_path(&self) -> String {
        match self {
            Self::Cmu(id) => id.synthesize(),
            Self::FeretSubject(id) => id.synthesize(),
            Self::Feret(id) => id.synthesize(),
            Self::Inria(id) => id.synthesize(),
            Self::Ncku(id) => id.synthesize(),
        }
    }

    /// How the file at [`relative_path`](Self::relative_path) is stored;
    /// `None` for directories.
    pub fn encoding(&self) -> Option<RasterEncoding> {
        match self {
            Self::FeretSubject(_) => None,
            Self::Feret(_) => Some(RasterEncoding::Bzip2Bitmap),
            Self::Cmu(_) | Self::Inria(_) | Self::Ncku(_) => Some(RasterEncoding::Bitmap),
        }
    }

    /// Ground-truth file accompanying the sample, if the dataset has one.
    pub fn annotation_path(&self) -> Option<String> {
        match self {
            Self::Inria(id) => Some(id.annotation_path()),
            _ => None,
        }
    }

    /// Parses `path` with `dataset`'s grammar.
    pub fn parse(dataset: Dataset, path: &str) -> Result<Self, GrammarError> {
        match dataset {
            Dataset::Cmu => CmuSample::parse(path).map(Self::Cmu),
            Dataset::Feret => FeretImage::parse(path)
                .map(Self::Feret)
                .or_else(|e| FeretSubject::parse(path).map(Self::FeretSubject).map_err(|_| e)),
            Dataset::Inria => InriaSample::parse(path).map(Self::Inria),
            Dataset::Ncku => NckuSample::parse(path).map(Self::Ncku),
        }
    }
}

impl fmt::Display for SampleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cmu(id) => fmt::Display::fmt(id, f),
            Self::FeretSubject(id) => fmt::Display::fmt(id, f),
            Self::Feret(id) => fmt::Display::fmt(id, f),
            Self::Inria(id) => fmt::Display::fmt(id, f),
            Self::Ncku(id) => fmt::Display::fmt(id, f),
        }
    }
}
