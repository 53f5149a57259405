/// Image pyramid step used for both detection levels.
pub const DEFAULT_SCALE_FACTOR: f64 = 1.1;
/// Neighbour threshold used for both detection levels.
pub const DEFAULT_MIN_NEIGHBORS: u32 = 2;

pub const DEFAULT_WINDOW_NAME: &str = "Face Detections";

/// Outline width in pixels for every marker style.
pub const MARKER_THICKNESS: u32 = 2;

// CMU Face Images (UCI machine learning repository).
pub const CMU_SUBJECTS: &[&str] = &[
    "an2i", "at33", "boland", "bpm", "ch4f", "cheyer", "choon", "danieln", "glickman", "karyadi",
    "kawamura", "kk49", "megak", "mitchell", "night", "phoebe", "saavik", "steffi", "sz24", "tammo",
];
pub const CMU_EXTENSION: &str = "pgm";

// Color FERET: subjects below the cutoff live on the first disc.
pub const FERET_SUBJECT_COUNT: u32 = 1208;
pub const FERET_PARTITION_CUTOFF: u32 = 740;
pub const FERET_IMAGE_SUFFIX: &str = ".ppm.bz2";
pub const FERET_ARCHIVE_EXTENSION: &str = "bz2";
pub const FERET_DISC_COUNT: u32 = 2;
/// Per-disc directory of ground-truth XML, one subdirectory per subject.
pub const FERET_GROUND_TRUTH_DIR: &str = "data/ground_truths/xml";
pub const FERET_GENDERS: &[&str] = &["Male", "Female"];
pub const FERET_POSES: &[&str] = &[
    "fa", "fb", "pl", "hl", "ql", "pr", "hr", "qr", "ra", "rb", "rc", "rd", "re",
];

// INRIA Head Pose Image Database.
pub const INRIA_PERSON_COUNT: u32 = 15;
pub const INRIA_SERIES_COUNT: u32 = 2;
pub const INRIA_IMAGES_PER_SERIES: u32 = 93;
pub const INRIA_IMAGE_EXTENSION: &str = "jpg";
pub const INRIA_ANNOTATION_EXTENSION: &str = "txt";

// NCKU robotics lab face detection / pose estimation database.
pub const NCKU_SUBJECT_COUNT: u32 = 90;
pub const NCKU_MIN_POSE: i32 = -90;
pub const NCKU_MAX_POSE: i32 = 90;
pub const NCKU_POSE_STEP: usize = 5;
pub const NCKU_EXTENSION: &str = "Jpg";
