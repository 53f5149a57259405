pub mod preprocess;
pub mod replay_region_detector;
pub mod rustface_region_detector;
