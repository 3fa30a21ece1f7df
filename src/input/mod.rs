//! Input processing module
//! Detects document formats and extracts their text

pub mod file_detector;
pub mod text_extractor;
pub mod manager;

pub use file_detector::FileType;
pub use manager::InputManager;
