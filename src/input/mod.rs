//! Input processing module
//! Handles format detection, job-description text extraction and upload reading

pub mod file_detector;
pub mod manager;
pub mod text_extractor;

pub use manager::{InputManager, Upload};
