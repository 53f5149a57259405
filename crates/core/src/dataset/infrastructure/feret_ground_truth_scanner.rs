use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::dataset::domain::feret_filter::{
    FeretDemographics, FeretFilter, FeretImageTruth, FeretSelection, FeretXmlError,
};
use crate::shared::constants::{FERET_DISC_COUNT, FERET_GROUND_TRUTH_DIR};

#[derive(Error, Debug)]
#[error("cannot list FERET ground truths in {path}: {source}")]
pub struct GroundTruthUnavailable {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Sorted UTF-8 names of the entries in `dir` that `keep` accepts.
fn sorted_names(dir: &Path, keep: impl Fn(&Path) -> bool) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !keep(&entry.path()) {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => log::warn!("Ignoring non UTF-8 name {raw:?} in {}", dir.display()),
        }
    }
    names.sort();
    Ok(names)
}

fn read_xml<T>(
    path: &Path,
    parse: fn(&str) -> Result<T, FeretXmlError>,
) -> Result<T, String> {
    let text = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    parse(&text).map_err(|e| e.to_string())
}

/// Reads the ground truths of both discs under `root` and returns the
/// images `filter` accepts, disc by disc, subjects and files in name order.
///
/// A disc without a ground-truth directory is an error. An unreadable
/// subject or recording file is logged and left out.
pub fn select_feret_images(
    root: &Path,
    filter: &FeretFilter,
) -> Result<Vec<FeretSelection>, GroundTruthUnavailable> {
    let mut selections = Vec::new();
    for disc in 1..=FERET_DISC_COUNT {
        let xml_rel = format!("dvd{disc}/{FERET_GROUND_TRUTH_DIR}");
        let xml_dir = root.join(&xml_rel);
        let subjects =
            sorted_names(&xml_dir, Path::is_dir).map_err(|source| GroundTruthUnavailable {
                path: xml_dir.clone(),
                source,
            })?;

        for subject in subjects {
            let subject_dir = xml_dir.join(&subject);
            let demographics_path = subject_dir.join(format!("{subject}.xml"));
            let demographics = match read_xml(&demographics_path, FeretDemographics::from_xml) {
                Ok(d) => d,
                Err(reason) => {
                    log::warn!("Skipping FERET subject {subject}: {reason}");
                    continue;
                }
            };
            if !filter.accept_subject(&demographics) {
                log::debug!("FERET subject {subject} rejected ({})", demographics.gender);
                continue;
            }

            let recordings = match sorted_names(&subject_dir, |p| {
                p.is_file()
                    && p.extension().and_then(|e| e.to_str()) == Some("xml")
                    && p.file_stem().and_then(|s| s.to_str()) != Some(subject.as_str())
            }) {
                Ok(names) => names,
                Err(e) => {
                    log::warn!("Skipping FERET subject {subject}: {e}");
                    continue;
                }
            };

            for name in recordings {
                match read_xml(&subject_dir.join(&name), FeretImageTruth::from_xml) {
                    Ok(image) if filter.accept_image(&image) => selections.push(FeretSelection {
                        xml_path: format!("{xml_rel}/{subject}/{name}"),
                        image_path: image.image_path,
                    }),
                    Ok(_) => {}
                    Err(reason) => {
                        log::warn!("Skipping FERET ground truth {subject}/{name}: {reason}")
                    }
                }
            }
        }
    }
    Ok(selections)
}
