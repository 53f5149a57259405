pub mod image_file_display;
pub mod log_display;
