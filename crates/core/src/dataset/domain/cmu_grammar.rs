//! CMU Face Images naming scheme.
//!
//! `{subject}/{subject}_{pose}_{expression}_{eyes}[_{scale}].pgm`, where the
//! scale suffix is omitted for full-resolution images.

use std::fmt;

use crate::dataset::domain::path_grammar::{lookup, GrammarError, PathGrammar};
use crate::shared::constants::CMU_EXTENSION;

const DATASET: &str = "cmu";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CmuPose {
    Straight,
    Left,
    Right,
    Up,
}

impl CmuPose {
    pub const ALL: [CmuPose; 4] = [Self::Straight, Self::Left, Self::Right, Self::Up];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Straight => "straight",
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CmuExpression {
    Neutral,
    Happy,
    Sad,
    Angry,
}

impl CmuExpression {
    pub const ALL: [CmuExpression; 4] = [Self::Neutral, Self::Happy, Self::Sad, Self::Angry];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Angry => "angry",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CmuEyes {
    Open,
    Sunglasses,
}

impl CmuEyes {
    pub const ALL: [CmuEyes; 2] = [Self::Open, Self::Sunglasses];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Sunglasses => "sunglasses",
        }
    }
}

/// Downsampling factor of a CMU image. `Full` is the unscaled original.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CmuScale {
    Full,
    Half,
    Quarter,
}

impl CmuScale {
    pub const ALL: [CmuScale; 3] = [Self::Full, Self::Half, Self::Quarter];

    pub fn factor(self) -> u32 {
        match self {
            Self::Full => 1,
            Self::Half => 2,
            Self::Quarter => 4,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Self::Full => "",
            Self::Half => "_2",
            Self::Quarter => "_4",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "2" => Some(Self::Half),
            "4" => Some(Self::Quarter),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CmuSample {
    pub subject: String,
    pub pose: CmuPose,
    pub expression: CmuExpression,
    pub eyes: CmuEyes,
    pub scale: CmuScale,
}

impl PathGrammar for CmuSample {
    fn synthesize(&self) -> String {
        format!(
            "{subject}/{subject}_{pose}_{expression}_{eyes}{scale}.{CMU_EXTENSION}",
            subject = self.subject,
            pose = self.pose.as_str(),
            expression = self.expression.as_str(),
            eyes = self.eyes.as_str(),
            scale = self.scale.suffix(),
        )
    }

    fn parse(path: &str) -> Result<Self, GrammarError> {
        let err = |reason: &str| GrammarError::new(DATASET, path, reason);

        let (dir, file) = path.split_once('/').ok_or_else(|| err("missing subject directory"))?;
        let stem = file
            .strip_suffix(&format!(".{CMU_EXTENSION}"))
            .ok_or_else(|| err("expected .pgm extension"))?;

        let fields: Vec<&str> = stem.split('_').collect();
        let (subject, pose, expression, eyes, scale) = match fields.as_slice() {
            [s, p, e, y] => (*s, *p, *e, *y, CmuScale::Full),
            [s, p, e, y, k] => (
                *s,
                *p,
                *e,
                *y,
                CmuScale::from_token(k).ok_or_else(|| err("unknown scale"))?,
            ),
            _ => return Err(err("expected 4 or 5 underscore-separated fields")),
        };

        if subject.is_empty() || subject != dir {
            return Err(err("subject does not match its directory"));
        }

        Ok(Self {
            subject: subject.to_string(),
            pose: lookup(&CmuPose::ALL, pose, CmuPose::as_str).ok_or_else(|| err("unknown pose"))?,
            expression: lookup(&CmuExpression::ALL, expression, CmuExpression::as_str)
                .ok_or_else(|| err("unknown expression"))?,
            eyes: lookup(&CmuEyes::ALL, eyes, CmuEyes::as_str).ok_or_else(|| err("unknown eyes"))?,
            scale,
        })
    }
}

impl fmt::Display for CmuSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cmu[subject={} pose={} expression={} eyes={} scale={}]",
            self.subject,
            self.pose.as_str(),
            self.expression.as_str(),
            self.eyes.as_str(),
            self.scale.factor()
        )
    }
}
