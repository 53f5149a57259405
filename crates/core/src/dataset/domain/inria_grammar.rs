//! INRIA Head Pose Image Database naming scheme.
//!
//! Each person has two series of 93 images. The image index within a series
//! determines the head pose, and both angles are spelled out in the file
//! name with an explicit sign: `Person01/person01134-15+15.jpg` is person 1,
//! series 1, index 34, tilt -15, pan +15.

use std::fmt;

use crate::dataset::domain::path_grammar::{parse_padded, GrammarError, PathGrammar};
use crate::shared::constants::{INRIA_ANNOTATION_EXTENSION, INRIA_IMAGE_EXTENSION};

const DATASET: &str = "inria";
const ANGLE_STEP: i32 = 15;
const PAN_STEPS: u32 = 13;
const LAST_INDEX: u32 = 92;

/// Head pose `(tilt, pan)` in degrees for an image index.
///
/// Index 0 looks straight down and index 92 straight up; the 91 images in
/// between sweep a 7x13 tilt/pan grid in 15 degree steps, except that the
/// outermost tilt rows were captured at +-60 rather than +-45.
pub fn head_pose(index: u32) -> (i32, i32) {
    match index {
        0 => (-90, 0),
        LAST_INDEX => (90, 0),
        i => {
            let step = (i - 1) as i32;
            let pan = (step % PAN_STEPS as i32 - 6) * ANGLE_STEP;
            let mut tilt = (step / PAN_STEPS as i32 - 3) * ANGLE_STEP;
            if tilt.abs() == 45 {
                tilt = tilt.signum() * 60;
            }
            (tilt, pan)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InriaSample {
    pub person: u32,
    pub series: u32,
    pub index: u32,
}

impl InriaSample {
    pub fn tilt(&self) -> i32 {
        head_pose(self.index).0
    }

    pub fn pan(&self) -> i32 {
        head_pose(self.index).1
    }

    /// Ground-truth face box file stored next to the image.
    pub fn annotation_path(&self) -> String {
        format!("{}.{INRIA_ANNOTATION_EXTENSION}", self.stem())
    }

    fn stem(&self) -> String {
        let (tilt, pan) = head_pose(self.index);
        format!(
            "Person{person:02}/person{person:02}{series}{index:02}{tilt:+}{pan:+}",
            person = self.person,
            series = self.series,
            index = self.index,
        )
    }
}

impl PathGrammar for InriaSample {
    fn synthesize(&self) -> String {
        format!("{}.{INRIA_IMAGE_EXTENSION}", self.stem())
    }

    fn parse(path: &str) -> Result<Self, GrammarError> {
        let err = |reason: &str| GrammarError::new(DATASET, path, reason);

        let (dir, file) = path.split_once('/').ok_or_else(|| err("missing person directory"))?;
        let dir_person = dir
            .strip_prefix("Person")
            .and_then(|p| parse_padded(p, 2))
            .ok_or_else(|| err("directory must be Person{nn}"))?;

        let stem = file
            .strip_prefix("person")
            .and_then(|s| s.strip_suffix(&format!(".{INRIA_IMAGE_EXTENSION}")))
            .ok_or_else(|| err("file must be person{...}.jpg"))?;
        if stem.len() < 5 || !stem.is_ascii() {
            return Err(err("truncated file name"));
        }
        let (ids, angles) = stem.split_at(5);

        let person = parse_padded(&ids[0..2], 2).ok_or_else(|| err("bad person number"))?;
        let series = parse_padded(&ids[2..3], 1).ok_or_else(|| err("bad series number"))?;
        let index = parse_padded(&ids[3..5], 2)
            .filter(|i| *i <= LAST_INDEX)
            .ok_or_else(|| err("bad image index"))?;
        if person != dir_person {
            return Err(err("person does not match its directory"));
        }

        let sample = Self {
            person,
            series,
            index,
        };
        let (tilt, pan) = head_pose(index);
        if angles != format!("{tilt:+}{pan:+}") {
            return Err(err("angles do not match the image index"));
        }
        Ok(sample)
    }
}

impl fmt::Display for InriaSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "inria[person={} series={} index={} tilt={} pan={}]",
            self.person,
            self.series,
            self.index,
            self.tilt(),
            self.pan()
        )
    }
}
