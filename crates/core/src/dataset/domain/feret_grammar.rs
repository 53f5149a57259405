//! Color FERET naming scheme.
//!
//! Subjects are split across two discs by id; each subject directory holds
//! bzip2-compressed PPM captures named `{id}_{capture date}_{pose}.ppm.bz2`:
//!
//! ```text
//! dvd1/data/images/00001/00001_930831_fa.ppm.bz2
//! dvd2/data/images/00740/00740_940422_hl.ppm.bz2
//! ```

use std::fmt;

use crate::dataset::domain::path_grammar::{parse_padded, GrammarError, PathGrammar};
use crate::shared::constants::{FERET_IMAGE_SUFFIX, FERET_PARTITION_CUTOFF};

const DATASET: &str = "feret";
const ID_WIDTH: usize = 5;

/// Disc (1 or 2) holding a subject's images.
pub fn partition(subject: u32) -> u32 {
    if subject < FERET_PARTITION_CUTOFF {
        1
    } else {
        2
    }
}

/// One subject directory. Its images are only known by listing it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FeretSubject {
    pub id: u32,
}

/// One compressed capture inside a subject directory.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FeretImage {
    pub subject: u32,
    pub capture_date: String,
    pub pose: String,
}

impl FeretImage {
    /// Parses a bare file name found while listing `subject`'s directory.
    pub fn from_file_name(subject: FeretSubject, file_name: &str) -> Result<Self, GrammarError> {
        Self::parse(&format!("{}/{file_name}", subject.synthesize()))
    }

    pub fn subject_dir(&self) -> FeretSubject {
        FeretSubject { id: self.subject }
    }
}

impl PathGrammar for FeretSubject {
    fn synthesize(&self) -> String {
        format!(
            "dvd{}/data/images/{:0width$}",
            partition(self.id),
            self.id,
            width = ID_WIDTH
        )
    }

    fn parse(path: &str) -> Result<Self, GrammarError> {
        let err = |reason: &str| GrammarError::new(DATASET, path, reason);

        let parts: Vec<&str> = path.split('/').collect();
        let [disc, "data", "images", id] = parts.as_slice() else {
            return Err(err("expected dvd{n}/data/images/{id}"));
        };
        let id = parse_padded(id, ID_WIDTH).ok_or_else(|| err("subject id must be 5 digits"))?;
        if *disc != format!("dvd{}", partition(id)) {
            return Err(err("subject is stored on the other disc"));
        }
        Ok(Self { id })
    }
}

impl PathGrammar for FeretImage {
    fn synthesize(&self) -> String {
        format!(
            "{dir}/{id:0width$}_{date}_{pose}{FERET_IMAGE_SUFFIX}",
            dir = self.subject_dir().synthesize(),
            id = self.subject,
            width = ID_WIDTH,
            date = self.capture_date,
            pose = self.pose,
        )
    }

    fn parse(path: &str) -> Result<Self, GrammarError> {
        let err = |reason: &str| GrammarError::new(DATASET, path, reason);

        let (dir, file) = path.rsplit_once('/').ok_or_else(|| err("missing subject directory"))?;
        let subject = FeretSubject::parse(dir)?;
        let stem = file
            .strip_suffix(FERET_IMAGE_SUFFIX)
            .ok_or_else(|| err("expected .ppm.bz2 extension"))?;

        let mut fields = stem.splitn(3, '_');
        let id = fields.next().and_then(|t| parse_padded(t, ID_WIDTH));
        if id != Some(subject.id) {
            return Err(err("file subject id does not match its directory"));
        }
        let capture_date = fields
            .next()
            .filter(|d| !d.is_empty() && d.bytes().all(|b| b.is_ascii_digit()))
            .ok_or_else(|| err("capture date must be numeric"))?;
        let pose = fields
            .next()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| err("missing pose"))?;

        Ok(Self {
            subject: subject.id,
            capture_date: capture_date.to_string(),
            pose: pose.to_string(),
        })
    }
}

impl fmt::Display for FeretSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "feret[subject={:05}]", self.id)
    }
}

impl fmt::Display for FeretImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "feret[subject={:05} date={} pose={}]",
            self.subject, self.capture_date, self.pose
        )
    }
}
