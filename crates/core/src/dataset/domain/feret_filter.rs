//! Selection of Color FERET images by their ground-truth metadata.
//!
//! Each disc carries `data/ground_truths/xml/{subject}/`, holding one
//! demographics file named after the subject and one recording file per
//! image. A [`FeretFilter`] accepts subjects by gender and images by pose
//! and by whether glasses, a beard or a mustache are visible.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use roxmltree::{Document, Node};
use thiserror::Error;

use crate::dataset::domain::feret_grammar::FeretImage;
use crate::dataset::domain::path_grammar::{GrammarError, PathGrammar};
use crate::dataset::domain::sample_id::SampleId;
use crate::shared::constants::{FERET_GENDERS, FERET_POSES};

#[derive(Error, Debug)]
pub enum FeretXmlError {
    #[error("malformed XML: {0}")]
    Malformed(#[from] roxmltree::Error),
    #[error("missing <{0}> element")]
    MissingElement(&'static str),
    #[error("<{element}> has no {attribute} attribute")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },
    #[error("cannot tell the disc from URL root {0:?}")]
    UnknownDisc(String),
}

fn element<'a, 'input>(
    doc: &'a Document<'input>,
    tag: &'static str,
) -> Result<Node<'a, 'input>, FeretXmlError> {
    doc.descendants()
        .find(|n| n.has_tag_name(tag))
        .ok_or(FeretXmlError::MissingElement(tag))
}

fn attribute(
    node: Node<'_, '_>,
    element: &'static str,
    attribute: &'static str,
) -> Result<String, FeretXmlError> {
    node.attribute(attribute)
        .map(str::to_string)
        .ok_or(FeretXmlError::MissingAttribute { element, attribute })
}

fn flag(
    node: Node<'_, '_>,
    element: &'static str,
    name: &'static str,
) -> Result<bool, FeretXmlError> {
    Ok(attribute(node, element, name)?.eq_ignore_ascii_case("yes"))
}

/// Who a FERET subject is, read from `{subject}/{subject}.xml`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeretDemographics {
    pub id: String,
    pub gender: String,
    pub birth_year: String,
    pub race: String,
}

impl FeretDemographics {
    pub fn from_xml(text: &str) -> Result<Self, FeretXmlError> {
        let doc = Document::parse(text)?;
        let subject = element(&doc, "Subject")?;
        Ok(Self {
            id: attribute(subject, "Subject", "id")?,
            gender: attribute(element(&doc, "Gender")?, "Gender", "value")?,
            birth_year: attribute(element(&doc, "YOB")?, "YOB", "value")?,
            race: attribute(element(&doc, "Race")?, "Race", "value")?,
        })
    }
}

/// What one recording shows, read from its ground-truth file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeretImageTruth {
    pub subject_id: String,
    /// Image path relative to the dataset root, `dvd{n}/data/images/...`.
    pub image_path: String,
    pub pose: String,
    pub glasses: bool,
    pub beard: bool,
    pub mustache: bool,
}

impl FeretImageTruth {
    pub fn from_xml(text: &str) -> Result<Self, FeretXmlError> {
        let doc = Document::parse(text)?;
        element(&doc, "Recording")?;

        let url = element(&doc, "URL")?;
        let root = attribute(url, "URL", "root")?;
        let disc = root
            .trim_end_matches('/')
            .chars()
            .last()
            .filter(char::is_ascii_digit)
            .ok_or_else(|| FeretXmlError::UnknownDisc(root.clone()))?;
        let relative = attribute(url, "URL", "relative")?;

        let hair = element(&doc, "Hair")?;
        Ok(Self {
            subject_id: attribute(element(&doc, "Subject")?, "Subject", "id")?,
            image_path: format!("dvd{disc}/{}", relative.trim_start_matches('/')),
            pose: attribute(element(&doc, "Pose")?, "Pose", "name")?,
            glasses: flag(element(&doc, "Wearing")?, "Wearing", "glasses")?,
            beard: flag(hair, "Hair", "beard")?,
            mustache: flag(hair, "Hair", "mustache")?,
        })
    }
}

/// Whether an attribute must be present, absent, or is irrelevant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Inclusion {
    #[default]
    Any,
    Yes,
    No,
}

impl Inclusion {
    pub fn accepts(self, present: bool) -> bool {
        match self {
            Self::Any => true,
            Self::Yes => present,
            Self::No => !present,
        }
    }
}

impl FromStr for Inclusion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "any" => Ok(Self::Any),
            "yes" => Ok(Self::Yes),
            "no" => Ok(Self::No),
            _ => Err(format!("expected any, yes or no, got {s:?}")),
        }
    }
}

impl fmt::Display for Inclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Any => "any",
            Self::Yes => "yes",
            Self::No => "no",
        })
    }
}

/// Criteria for picking FERET images. The default accepts everything.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeretFilter {
    pub genders: Vec<String>,
    pub poses: Vec<String>,
    pub glasses: Inclusion,
    pub beard: Inclusion,
    pub mustache: Inclusion,
}

impl Default for FeretFilter {
    fn default() -> Self {
        Self {
            genders: FERET_GENDERS.iter().map(|g| g.to_string()).collect(),
            poses: FERET_POSES.iter().map(|p| p.to_string()).collect(),
            glasses: Inclusion::Any,
            beard: Inclusion::Any,
            mustache: Inclusion::Any,
        }
    }
}

impl FeretFilter {
    /// Genders compare without regard to case.
    pub fn accept_subject(&self, subject: &FeretDemographics) -> bool {
        self.genders
            .iter()
            .any(|g| g.eq_ignore_ascii_case(&subject.gender))
    }

    pub fn accept_image(&self, image: &FeretImageTruth) -> bool {
        self.poses.iter().any(|p| *p == image.pose)
            && self.glasses.accepts(image.glasses)
            && self.beard.accepts(image.beard)
            && self.mustache.accepts(image.mustache)
    }
}

impl fmt::Display for FeretFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "genders={} poses={} glasses={} beard={} mustache={}",
            self.genders.join(","),
            self.poses.join(","),
            self.glasses,
            self.beard,
            self.mustache
        )
    }
}

/// An accepted image and the ground-truth file that accepted it, both
/// relative to the dataset root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeretSelection {
    pub xml_path: String,
    pub image_path: String,
}

impl FeretSelection {
    pub fn sample_id(&self) -> Result<SampleId, GrammarError> {
        FeretImage::parse(&self.image_path).map(SampleId::Feret)
    }
}

/// One `xml path,image path` line per selection, no header.
pub fn write_csv<W: Write>(selections: &[FeretSelection], mut out: W) -> io::Result<()> {
    for selection in selections {
        writeln!(out, "{},{}", selection.xml_path, selection.image_path)?;
    }
    out.flush()
}
