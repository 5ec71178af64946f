pub mod storage;
pub mod dump;

// Re-export main types and functions for easier access
pub use storage::ScheduleStorage;
pub use dump::dump_rows;
