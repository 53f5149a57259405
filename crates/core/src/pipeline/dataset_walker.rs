use std::path::Path;
use std::time::Instant;

use crate::dataset::domain::dataset::Dataset;
use crate::dataset::domain::feret_filter::FeretSelection;
use crate::dataset::domain::feret_grammar::{FeretImage, FeretSubject};
use crate::dataset::domain::path_grammar::PathGrammar;
use crate::dataset::domain::sample_id::SampleId;
use crate::decoding::domain::raster_decoder::RasterDecoder;
use crate::display::domain::raster_display::RasterDisplay;
use crate::overlay::domain::marker_style::GROUND_TRUTH;
use crate::overlay::hierarchical_overlay_engine::HierarchicalOverlayEngine;
use crate::pipeline::walk_logger::WalkLogger;
use crate::pipeline::walk_report::WalkReport;
use crate::shared::constants::FERET_ARCHIVE_EXTENSION;

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Per-sample pipeline over a whole dataset:
/// synthesize → decode → detect → draw → display.
///
/// A sample that fails at any step is reported to the logger and skipped;
/// nothing short of the walk ending stops it.
pub struct DatasetWalker {
    decoder: Box<dyn RasterDecoder>,
    engine: HierarchicalOverlayEngine,
    display: Box<dyn RasterDisplay>,
    logger: Box<dyn WalkLogger>,
    window: String,
}

impl DatasetWalker {
    pub fn new(
        decoder: Box<dyn RasterDecoder>,
        engine: HierarchicalOverlayEngine,
        display: Box<dyn RasterDisplay>,
        logger: Box<dyn WalkLogger>,
        window: impl Into<String>,
    ) -> Self {
        Self {
            decoder,
            engine,
            display,
            logger,
            window: window.into(),
        }
    }

    /// Visits every identifier of `dataset` under `root` in enumeration order.
    pub fn walk(&mut self, dataset: Dataset, root: &Path) -> WalkReport {
        self.logger
            .info(&format!("Walking {dataset} dataset at {}", root.display()));
        self.walk_ids(root, &dataset.identifiers())
    }

    /// Visits `ids` in order. FERET subject directories are listed and their
    /// archives visited in file-name order.
    pub fn walk_ids(&mut self, root: &Path, ids: &[SampleId]) -> WalkReport {
        let mut report = WalkReport::default();
        let total = ids.len();

        for (i, id) in ids.iter().enumerate() {
            match id {
                SampleId::FeretSubject(subject) => self.visit_subject(root, *subject, &mut report),
                _ => self.visit(root, id, &mut report),
            }
            self.logger.progress(i + 1, total);
        }
        self.finish(report)
    }

    /// Visits the FERET images picked from their ground truths, in order.
    pub fn walk_selection(&mut self, root: &Path, selections: &[FeretSelection]) -> WalkReport {
        let mut report = WalkReport::default();
        let total = selections.len();

        for (i, selection) in selections.iter().enumerate() {
            match selection.sample_id() {
                Ok(id) => self.visit(root, &id, &mut report),
                Err(e) => {
                    self.logger
                        .skipped(&selection.xml_path, &selection.image_path, &e.to_string());
                    report.record_skipped();
                }
            }
            self.logger.progress(i + 1, total);
        }
        self.finish(report)
    }

    fn finish(&mut self, report: WalkReport) -> WalkReport {
        self.logger.info(&format!("Walk finished: {report}"));
        self.logger.summary();
        report
    }

    fn visit_subject(&mut self, root: &Path, subject: FeretSubject, report: &mut WalkReport) {
        let dir = subject.synthesize();
        match list_archives(&root.join(&dir)) {
            Ok(names) => {
                for name in names {
                    match FeretImage::from_file_name(subject, &name) {
                        Ok(image) => self.visit(root, &SampleId::Feret(image), report),
                        Err(e) => {
                            let path = format!("{dir}/{name}");
                            self.logger
                                .skipped(&subject.to_string(), &path, &e.to_string());
                            report.record_skipped();
                        }
                    }
                }
            }
            Err(reason) => {
                self.logger.skipped(&subject.to_string(), &dir, &reason);
                report.record_skipped();
            }
        }
    }

    fn visit(&mut self, root: &Path, id: &SampleId, report: &mut WalkReport) {
        let path = id.relative_path();
        match self.process(root, id, &path) {
            Ok((faces, eyes)) => report.record_displayed(faces, eyes),
            Err(e) => {
                self.logger.skipped(&id.to_string(), &path, &e.to_string());
                report.record_skipped();
            }
        }
    }

    /// Returns the number of faces and eyes drawn.
    fn process(
        &mut self,
        root: &Path,
        id: &SampleId,
        path: &str,
    ) -> Result<(usize, usize), Box<dyn std::error::Error>> {
        let encoding = id.encoding().ok_or("identifier does not name a file")?;

        let start = Instant::now();
        let raster = self.decoder.decode(&root.join(path), encoding)?;
        self.logger.timing("decode", elapsed_ms(start));

        let start = Instant::now();
        let (mut raster, results) = self.engine.annotate_with_results(raster)?;
        self.logger.timing("detect", elapsed_ms(start));

        let faces = results.len();
        let eyes: usize = results.iter().map(|r| r.eyes.len()).sum();
        self.logger.metric("faces", faces as f64);
        self.logger.metric("eyes", eyes as f64);

        if let Some(annotation) = id.annotation_path() {
            match self.decoder.decode_annotation(&root.join(&annotation)) {
                Ok(record) => {
                    self.engine
                        .mark(&mut raster, &[record.bounding_box()], &GROUND_TRUTH)?
                }
                Err(e) => self
                    .logger
                    .warn(&format!("No ground truth for {id} ({annotation}): {e}")),
            }
        }

        let start = Instant::now();
        self.display.show(&self.window, path, &raster)?;
        self.logger.timing("display", elapsed_ms(start));

        Ok((faces, eyes))
    }
}

/// Names of the `.bz2` files in `dir`, sorted.
fn list_archives(dir: &Path) -> Result<Vec<String>, String> {
    if !dir.is_dir() {
        return Err("subject directory is missing or not a directory".to_string());
    }
    let entries = std::fs::read_dir(dir).map_err(|e| e.to_string())?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| e.to_string())?;
        let path = entry.path();
        if !path.is_file()
            || path.extension().and_then(|e| e.to_str()) != Some(FERET_ARCHIVE_EXTENSION)
        {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => log::warn!("Ignoring non UTF-8 file name {raw:?} in {}", dir.display()),
        }
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::domain::inria_grammar::InriaSample;
    use crate::dataset::domain::ncku_grammar::{NckuKind, NckuSample};
    use crate::decoding::domain::annotation_record::AnnotationRecord;
    use crate::decoding::domain::decode_error::DecodeError;
    use crate::decoding::domain::raster_decoder::RasterEncoding;
    use crate::detection::domain::detection_params::DetectionParams;
    use crate::detection::infrastructure::replay_region_detector::ReplayRegionDetector;
    use crate::overlay::infrastructure::outline_painter::OutlinePainter;
    use crate::shared::raster::Raster;
    use crate::shared::rect::{LocalSpace, Rect};
    use std::collections::{HashMap, HashSet};
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    const ROOT: &str = "/data";

    // ── Stubs ──

    /// Serves blank rasters for known paths; everything else is missing.
    struct StubDecoder {
        present: Option<HashSet<PathBuf>>,
        corrupt: HashSet<PathBuf>,
        annotations: HashMap<PathBuf, String>,
        decoded: Arc<Mutex<Vec<(PathBuf, RasterEncoding)>>>,
    }

    impl StubDecoder {
        fn serving(paths: &[String]) -> Self {
            Self {
                present: Some(paths.iter().map(|p| Path::new(ROOT).join(p)).collect()),
                corrupt: HashSet::new(),
                annotations: HashMap::new(),
                decoded: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn serving_everything() -> Self {
            Self {
                present: None,
                ..Self::serving(&[])
            }
        }
    }

    impl RasterDecoder for StubDecoder {
        fn decode(&self, path: &Path, encoding: RasterEncoding) -> Result<Raster, DecodeError> {
            self.decoded
                .lock()
                .unwrap()
                .push((path.to_path_buf(), encoding));
            if self.corrupt.contains(path) {
                return Err(DecodeError::corrupt(path, "bad bytes"));
            }
            if let Some(present) = &self.present {
                if !present.contains(path) {
                    return Err(DecodeError::PathNotResolved {
                        path: path.to_path_buf(),
                        source: std::io::Error::from(std::io::ErrorKind::NotFound),
                    });
                }
            }
            Ok(Raster::new(vec![128u8; 64 * 64 * 3], 64, 64, 3))
        }

        fn decode_annotation(&self, path: &Path) -> Result<AnnotationRecord, DecodeError> {
            let text = self
                .annotations
                .get(path)
                .ok_or_else(|| DecodeError::corrupt(path, "no annotation"))?;
            text.parse().map_err(|e| DecodeError::corrupt(path, e))
        }
    }

    type Shown = Arc<Mutex<Vec<(String, String, Raster)>>>;

    struct StubDisplay {
        shown: Shown,
        fail_on: Option<String>,
    }

    impl RasterDisplay for StubDisplay {
        fn show(
            &mut self,
            window: &str,
            sample_path: &str,
            raster: &Raster,
        ) -> Result<(), Box<dyn std::error::Error>> {
            if self.fail_on.as_deref() == Some(sample_path) {
                return Err("display closed".into());
            }
            self.shown.lock().unwrap().push((
                window.to_string(),
                sample_path.to_string(),
                raster.clone(),
            ));
            Ok(())
        }
    }

    type Skips = Arc<Mutex<Vec<(String, String)>>>;

    struct RecordingLogger {
        skips: Skips,
        progress: Arc<Mutex<Vec<(usize, usize)>>>,
        stages: Arc<Mutex<Vec<String>>>,
        warnings: Arc<Mutex<Vec<String>>>,
    }

    impl WalkLogger for RecordingLogger {
        fn progress(&mut self, current: usize, total: usize) {
            self.progress.lock().unwrap().push((current, total));
        }
        fn timing(&mut self, stage: &str, _duration_ms: f64) {
            self.stages.lock().unwrap().push(stage.to_string());
        }
        fn metric(&mut self, _name: &str, _value: f64) {}
        fn skipped(&mut self, _sample: &str, path: &str, reason: &str) {
            self.skips
                .lock()
                .unwrap()
                .push((path.to_string(), reason.to_string()));
        }
        fn info(&mut self, _message: &str) {}
        fn warn(&mut self, message: &str) {
            self.warnings.lock().unwrap().push(message.to_string());
        }
    }

    struct Harness {
        walker: DatasetWalker,
        shown: Shown,
        skips: Skips,
        progress: Arc<Mutex<Vec<(usize, usize)>>>,
        stages: Arc<Mutex<Vec<String>>>,
        warnings: Arc<Mutex<Vec<String>>>,
    }

    fn harness(
        decoder: StubDecoder,
        faces: Vec<Vec<Rect<LocalSpace>>>,
        eyes: Vec<Vec<Rect<LocalSpace>>>,
        fail_display_on: Option<&str>,
    ) -> Harness {
        let shown: Shown = Arc::new(Mutex::new(Vec::new()));
        let skips: Skips = Arc::new(Mutex::new(Vec::new()));
        let progress = Arc::new(Mutex::new(Vec::new()));
        let stages = Arc::new(Mutex::new(Vec::new()));
        let warnings = Arc::new(Mutex::new(Vec::new()));
        let engine = HierarchicalOverlayEngine::new(
            Box::new(ReplayRegionDetector::new(faces)),
            Box::new(ReplayRegionDetector::new(eyes)),
            Box::new(OutlinePainter::new()),
            DetectionParams::default(),
        );
        let walker = DatasetWalker::new(
            Box::new(decoder),
            engine,
            Box::new(StubDisplay {
                shown: shown.clone(),
                fail_on: fail_display_on.map(str::to_string),
            }),
            Box::new(RecordingLogger {
                skips: skips.clone(),
                progress: progress.clone(),
                stages: stages.clone(),
                warnings: warnings.clone(),
            }),
            "Face Detections",
        );
        Harness {
            walker,
            shown,
            skips,
            progress,
            stages,
            warnings,
        }
    }

    fn ncku(pose: i32) -> SampleId {
        SampleId::Ncku(NckuSample {
            subject: 1,
            kind: NckuKind::Real,
            pose,
        })
    }

    fn local(x: i32, y: i32, w: i32, h: i32) -> Rect<LocalSpace> {
        Rect::new(x, y, w, h)
    }

    fn shown_paths(shown: &Shown) -> Vec<String> {
        shown.lock().unwrap().iter().map(|(_, p, _)| p.clone()).collect()
    }

    // ── Skip and continue ──

    #[test]
    fn test_missing_samples_are_skipped_and_walk_continues() {
        let ids = vec![ncku(-90), ncku(-85), ncku(-80)];
        let decoder = StubDecoder::serving(&[ids[0].relative_path(), ids[2].relative_path()]);
        let mut h = harness(decoder, vec![], vec![], None);

        let report = h.walker.walk_ids(Path::new(ROOT), &ids);

        assert_eq!(
            report,
            WalkReport {
                visited: 3,
                displayed: 2,
                skipped: 1,
                faces: 0,
                eyes: 0
            }
        );
        assert_eq!(
            shown_paths(&h.shown),
            vec!["Subject01/A_01_-90.Jpg", "Subject01/A_01_-80.Jpg"]
        );
        let skips = h.skips.lock().unwrap();
        assert_eq!(skips.len(), 1);
        assert_eq!(skips[0].0, "Subject01/A_01_-85.Jpg");
        assert!(skips[0].1.contains("cannot open"));
    }

    #[test]
    fn test_corrupt_sample_is_skipped() {
        let ids = vec![ncku(0), ncku(5)];
        let mut decoder = StubDecoder::serving_everything();
        decoder.corrupt.insert(Path::new(ROOT).join(ids[0].relative_path()));
        let mut h = harness(decoder, vec![], vec![], None);

        let report = h.walker.walk_ids(Path::new(ROOT), &ids);

        assert_eq!((report.displayed, report.skipped), (1, 1));
        assert!(h.skips.lock().unwrap()[0].1.contains("bad bytes"));
    }

    #[test]
    fn test_display_failure_is_skipped() {
        let ids = vec![ncku(0), ncku(5)];
        let mut h = harness(
            StubDecoder::serving_everything(),
            vec![],
            vec![],
            Some("Subject01/A_01_0.Jpg"),
        );

        let report = h.walker.walk_ids(Path::new(ROOT), &ids);

        assert_eq!((report.displayed, report.skipped), (1, 1));
        assert_eq!(shown_paths(&h.shown), vec!["Subject01/A_01_+05.Jpg"]);
    }

    // ── Detection and drawing ──

    #[test]
    fn test_displayed_raster_carries_outlines_and_counts() {
        let ids = vec![ncku(0), ncku(5)];
        let mut h = harness(
            StubDecoder::serving_everything(),
            vec![vec![local(10, 10, 30, 30)], vec![]],
            vec![vec![local(2, 2, 8, 8), local(15, 2, 8, 8)]],
            None,
        );

        let report = h.walker.walk_ids(Path::new(ROOT), &ids);

        assert_eq!((report.faces, report.eyes), (1, 2));
        let shown = h.shown.lock().unwrap();
        assert_eq!(shown[0].0, "Face Detections");
        let first = shown[0].2.as_ndarray();
        assert_eq!([first[[10, 10, 0]], first[[10, 10, 1]]], [255, 0]);
        assert_eq!([first[[12, 12, 0]], first[[12, 12, 1]]], [0, 255]);
        assert!(shown[1].2.data().iter().all(|&v| v == 128));
    }

    #[test]
    fn test_stage_timings_in_order() {
        let mut h = harness(StubDecoder::serving_everything(), vec![], vec![], None);
        h.walker.walk_ids(Path::new(ROOT), &[ncku(0)]);
        assert_eq!(*h.stages.lock().unwrap(), vec!["decode", "detect", "display"]);
    }

    #[test]
    fn test_progress_counts_identifiers() {
        let mut h = harness(StubDecoder::serving(&[]), vec![], vec![], None);
        h.walker.walk_ids(Path::new(ROOT), &[ncku(0), ncku(5), ncku(10)]);
        assert_eq!(*h.progress.lock().unwrap(), vec![(1, 3), (2, 3), (3, 3)]);
    }

    // ── Datasets ──

    #[test]
    fn test_walk_visits_whole_cmu_dataset_in_order() {
        let decoder = StubDecoder::serving(&[
            "tammo/tammo_up_angry_sunglasses_4.pgm".to_string(),
            "an2i/an2i_straight_neutral_open.pgm".to_string(),
        ]);
        let decoded = decoder.decoded.clone();
        let mut h = harness(decoder, vec![], vec![], None);

        let report = h.walker.walk(Dataset::Cmu, Path::new(ROOT));

        assert_eq!(report.visited, 1920);
        assert_eq!(report.displayed, 2);
        assert_eq!(report.skipped, 1918);
        assert_eq!(
            shown_paths(&h.shown),
            vec![
                "an2i/an2i_straight_neutral_open.pgm",
                "tammo/tammo_up_angry_sunglasses_4.pgm"
            ]
        );
        assert!(decoded
            .lock()
            .unwrap()
            .iter()
            .all(|(_, encoding)| *encoding == RasterEncoding::Bitmap));
    }

    #[test]
    fn test_inria_ground_truth_is_drawn() {
        let id = SampleId::Inria(InriaSample {
            person: 1,
            series: 1,
            index: 46,
        });
        let mut decoder = StubDecoder::serving_everything();
        decoder.annotations.insert(
            Path::new(ROOT).join("Person01/person01146+0+0.txt"),
            "person01146+0+0.jpg Face 32 32 20 20".to_string(),
        );
        let mut h = harness(decoder, vec![], vec![], None);

        let report = h.walker.walk_ids(Path::new(ROOT), &[id]);

        assert_eq!(report.displayed, 1);
        let shown = h.shown.lock().unwrap();
        let raster = shown[0].2.as_ndarray();
        assert_eq!(
            [raster[[22, 22, 0]], raster[[22, 22, 1]], raster[[22, 22, 2]]],
            [0, 0, 255]
        );
    }

    #[test]
    fn test_inria_missing_ground_truth_still_displays() {
        let id = SampleId::Inria(InriaSample {
            person: 1,
            series: 1,
            index: 46,
        });
        let mut h = harness(StubDecoder::serving_everything(), vec![], vec![], None);

        let report = h.walker.walk_ids(Path::new(ROOT), &[id]);

        assert_eq!((report.displayed, report.skipped), (1, 0));
        assert!(h.skips.lock().unwrap().is_empty());
        let warnings = h.warnings.lock().unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Person01/person01146+0+0.txt"));
    }

    #[test]
    fn test_out_of_range_ground_truth_does_not_stop_walk() {
        let first = SampleId::Inria(InriaSample {
            person: 1,
            series: 1,
            index: 0,
        });
        let second = SampleId::Inria(InriaSample {
            person: 1,
            series: 1,
            index: 1,
        });
        let mut decoder = StubDecoder::serving_everything();
        decoder.annotations.insert(
            Path::new(ROOT).join(first.annotation_path().unwrap()),
            "x Face 2147483647 1 10 10".to_string(),
        );
        decoder.annotations.insert(
            Path::new(ROOT).join(second.annotation_path().unwrap()),
            "y Face 4000000000 1 10 10".to_string(),
        );
        let mut h = harness(decoder, vec![], vec![], None);

        let report = h.walker.walk_ids(Path::new(ROOT), &[first, second]);

        assert_eq!((report.visited, report.displayed, report.skipped), (2, 2, 0));
        let warnings = h.warnings.lock().unwrap();
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().all(|w| w.contains("coordinate range")));
        assert!(h.shown.lock().unwrap()[0].2.data().iter().all(|&v| v == 128));
    }

    #[test]
    fn test_feret_subject_directories_are_listed() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("dvd1/data/images/00001");
        std::fs::create_dir_all(&dir).unwrap();
        for name in [
            "00001_930831_fb.ppm.bz2",
            "00001_930831_fa.ppm.bz2",
            "bad.bz2",
            "notes.txt",
        ] {
            std::fs::write(dir.join(name), b"").unwrap();
        }
        std::fs::create_dir_all(root.path().join("dvd2/data/images")).unwrap();
        std::fs::write(root.path().join("dvd2/data/images/00740"), b"").unwrap();

        let decoder = StubDecoder::serving_everything();
        let decoded = decoder.decoded.clone();
        let mut h = harness(decoder, vec![], vec![], None);

        let report = h.walker.walk_ids(
            root.path(),
            &[
                SampleId::FeretSubject(FeretSubject { id: 1 }),
                SampleId::FeretSubject(FeretSubject { id: 2 }),
                SampleId::FeretSubject(FeretSubject { id: 740 }),
            ],
        );

        assert_eq!(
            shown_paths(&h.shown),
            vec![
                "dvd1/data/images/00001/00001_930831_fa.ppm.bz2",
                "dvd1/data/images/00001/00001_930831_fb.ppm.bz2",
            ]
        );
        assert_eq!((report.visited, report.displayed, report.skipped), (5, 2, 3));
        assert!(decoded
            .lock()
            .unwrap()
            .iter()
            .all(|(_, encoding)| *encoding == RasterEncoding::Bzip2Bitmap));

        let skipped: Vec<String> = h.skips.lock().unwrap().iter().map(|(p, _)| p.clone()).collect();
        assert_eq!(
            skipped,
            vec![
                "dvd1/data/images/00001/bad.bz2",
                "dvd1/data/images/00002",
                "dvd2/data/images/00740",
            ]
        );
        assert_eq!(*h.progress.lock().unwrap(), vec![(1, 3), (2, 3), (3, 3)]);
    }

    #[test]
    fn test_walk_selection_visits_selected_images() {
        let selections = vec![
            FeretSelection {
                xml_path: "dvd1/data/ground_truths/xml/00001/00001_930831_fa.xml".to_string(),
                image_path: "dvd1/data/images/00001/00001_930831_fa.ppm.bz2".to_string(),
            },
            FeretSelection {
                xml_path: "dvd1/data/ground_truths/xml/00002/00002_930831_fa.xml".to_string(),
                image_path: "dvd2/data/images/00002/00002_930831_fa.ppm.bz2".to_string(),
            },
            FeretSelection {
                xml_path: "dvd2/data/ground_truths/xml/00740/00740_940422_hl.xml".to_string(),
                image_path: "dvd2/data/images/00740/00740_940422_hl.ppm.bz2".to_string(),
            },
        ];
        let decoder = StubDecoder::serving_everything();
        let decoded = decoder.decoded.clone();
        let mut h = harness(decoder, vec![], vec![], None);

        let report = h.walker.walk_selection(Path::new(ROOT), &selections);

        assert_eq!((report.visited, report.displayed, report.skipped), (3, 2, 1));
        assert_eq!(
            shown_paths(&h.shown),
            vec![
                "dvd1/data/images/00001/00001_930831_fa.ppm.bz2",
                "dvd2/data/images/00740/00740_940422_hl.ppm.bz2",
            ]
        );
        assert!(decoded
            .lock()
            .unwrap()
            .iter()
            .all(|(_, encoding)| *encoding == RasterEncoding::Bzip2Bitmap));
        assert_eq!(
            h.skips.lock().unwrap()[0].0,
            "dvd2/data/images/00002/00002_930831_fa.ppm.bz2"
        );
        assert_eq!(*h.progress.lock().unwrap(), vec![(1, 3), (2, 3), (3, 3)]);
    }
}
