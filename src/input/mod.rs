pub mod csv_source;
pub mod file_detector;
pub mod manager;
pub mod text_extractor;

pub use csv_source::CsvResumeSource;
pub use file_detector::FileType;
pub use manager::InputManager;
