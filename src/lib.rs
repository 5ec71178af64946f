pub mod schedule;
pub mod output;
pub mod utils;

#[cfg(test)]
mod tests;

// Re-export main types and functions for easier access
pub use schedule::types::{
    Cell, Row, SheetRows, FlatCourseRecord, CourseEntry, SectionEntry,
    ConvertOptions, ConvertResult, ConvertStats, RowCounts,
};
pub use schedule::scanner::{build, classify, CourseBuilder, RowKind, SheetScanner, Workbook};
pub use schedule::processor::{aggregate, ScheduleProcessor};

pub use output::{ScheduleStorage, dump_rows};

// Re-export utility functions
pub use utils::file_utils;
