use std::fmt;
use std::str::FromStr;

use crate::dataset::domain::cmu_grammar::{CmuExpression, CmuEyes, CmuPose, CmuSample, CmuScale};
use crate::dataset::domain::feret_grammar::FeretSubject;
use crate::dataset::domain::inria_grammar::InriaSample;
use crate::dataset::domain::ncku_grammar::{NckuKind, NckuSample};
use crate::dataset::domain::sample_id::SampleId;
use crate::shared::constants::{
    CMU_SUBJECTS, FERET_SUBJECT_COUNT, INRIA_IMAGES_PER_SERIES, INRIA_PERSON_COUNT,
    INRIA_SERIES_COUNT, NCKU_MAX_POSE, NCKU_MIN_POSE, NCKU_POSE_STEP, NCKU_SUBJECT_COUNT,
};

/// The closed set of supported datasets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dataset {
    Cmu,
    Feret,
    Inria,
    Ncku,
}

impl Dataset {
    pub const ALL: [Dataset; 4] = [Self::Cmu, Self::Feret, Self::Inria, Self::Ncku];

    pub fn name(self) -> &'static str {
        match self {
            Self::Cmu => "cmu",
            Self::Feret => "feret",
            Self::Inria => "inria",
            Self::Ncku => "ncku",
        }
    }

    /// Every identifier of the dataset, outermost dimension first.
    ///
    /// FERET yields one [`SampleId::FeretSubject`] per subject; the images
    /// inside each subject directory are only known once it is listed.
    pub fn identifiers(self) -> Vec<SampleId> {
        match self {
            Self::Cmu => cmu_identifiers(),
            Self::Feret => (1..=FERET_SUBJECT_COUNT)
                .map(|id| SampleId::FeretSubject(FeretSubject { id }))
                .collect(),
            Self::Inria => inria_identifiers(),
            Self::Ncku => ncku_identifiers(),
        }
    }
}

fn cmu_identifiers() -> Vec<SampleId> {
    let mut ids = Vec::new();
    for subject in CMU_SUBJECTS {
        for pose in CmuPose::ALL {
            for expression in CmuExpression::ALL {
                for eyes in CmuEyes::ALL {
                    for scale in CmuScale::ALL {
                        ids.push(SampleId::Cmu(CmuSample {
                            subject: subject.to_string(),
                            pose,
                            expression,
                            eyes,
                            scale,
                        }));
                    }
                }
            }
        }
    }
    ids
}

fn inria_identifiers() -> Vec<SampleId> {
    let mut ids = Vec::new();
    for person in 1..=INRIA_PERSON_COUNT {
        for series in 1..=INRIA_SERIES_COUNT {
            for index in 0..INRIA_IMAGES_PER_SERIES {
                ids.push(SampleId::Inria(InriaSample {
                    person,
                    series,
                    index,
                }));
            }
        }
    }
    ids
}

fn ncku_identifiers() -> Vec<SampleId> {
    let mut ids = Vec::new();
    for subject in 1..=NCKU_SUBJECT_COUNT {
        for pose in (NCKU_MIN_POSE..=NCKU_MAX_POSE).step_by(NCKU_POSE_STEP) {
            ids.push(SampleId::Ncku(NckuSample {
                subject,
                kind: NckuKind::Real,
                pose,
            }));
        }
    }
    ids
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dataset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown dataset '{s}' (expected cmu, feret, inria or ncku)"))
    }
}
