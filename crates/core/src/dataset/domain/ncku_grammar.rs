//! NCKU robotics lab face database naming scheme.
//!
//! `Subject{nn}/{kind}_{nn}_{pose}.Jpg`, where `kind` is `A` for real
//! photographs and `B` for synthesized ones, and `pose` is the yaw angle.
//! Non-zero poses carry a sign and a two-digit magnitude (`-05`, `+30`);
//! the frontal pose is written as a bare `0`.

use std::fmt;

use crate::dataset::domain::path_grammar::{parse_padded, GrammarError, PathGrammar};
use crate::shared::constants::NCKU_EXTENSION;

const DATASET: &str = "ncku";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NckuKind {
    Real,
    Synthesized,
}

impl NckuKind {
    pub fn as_char(self) -> char {
        match self {
            Self::Real => 'A',
            Self::Synthesized => 'B',
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "A" => Some(Self::Real),
            "B" => Some(Self::Synthesized),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NckuSample {
    pub subject: u32,
    pub kind: NckuKind,
    pub pose: i32,
}

/// File-name spelling of a yaw angle.
pub fn format_pose(pose: i32) -> String {
    match pose {
        p if p < 0 => format!("-{:02}", p.unsigned_abs()),
        p if p > 0 => format!("+{p:02}"),
        _ => "0".to_string(),
    }
}

fn parse_pose(token: &str) -> Option<i32> {
    let value: i32 = token.parse().ok()?;
    (format_pose(value) == token).then_some(value)
}

impl PathGrammar for NckuSample {
    fn synthesize(&self) -> String {
        format!(
            "Subject{subject:02}/{kind}_{subject:02}_{pose}.{NCKU_EXTENSION}",
            subject = self.subject,
            kind = self.kind.as_char(),
            pose = format_pose(self.pose),
        )
    }

    fn parse(path: &str) -> Result<Self, GrammarError> {
        let err = |reason: &str| GrammarError::new(DATASET, path, reason);

        let (dir, file) = path.split_once('/').ok_or_else(|| err("missing subject directory"))?;
        let dir_subject = dir
            .strip_prefix("Subject")
            .and_then(|s| parse_padded(s, 2))
            .ok_or_else(|| err("directory must be Subject{nn}"))?;

        let stem = file
            .strip_suffix(&format!(".{NCKU_EXTENSION}"))
            .ok_or_else(|| err("expected .Jpg extension"))?;
        let fields: Vec<&str> = stem.split('_').collect();
        let [kind, subject, pose] = fields.as_slice() else {
            return Err(err("expected {kind}_{subject}_{pose}"));
        };

        let kind = NckuKind::from_token(kind).ok_or_else(|| err("kind must be A or B"))?;
        let subject = parse_padded(subject, 2).ok_or_else(|| err("bad subject number"))?;
        if subject != dir_subject {
            return Err(err("subject does not match its directory"));
        }
        let pose = parse_pose(pose).ok_or_else(|| err("badly formatted pose"))?;

        Ok(Self {
            subject,
            kind,
            pose,
        })
    }
}

impl fmt::Display for NckuSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ncku[subject={} kind={} pose={}]",
            self.subject,
            self.kind.as_char(),
            self.pose
        )
    }
}
