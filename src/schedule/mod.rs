pub mod types;
pub mod scanner;
pub mod processor;

// Re-export the main API for easier access
pub use types::{Cell, Row, SheetRows, FlatCourseRecord, CourseEntry, SectionEntry, ConvertStats};
pub use scanner::SheetScanner;
pub use processor::ScheduleProcessor;
