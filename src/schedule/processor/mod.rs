pub mod aggregator;
mod schedule_processor;
mod stats;

// Re-export from submodules
pub use aggregator::{aggregate, aggregate_with_stats, MergeStats};
pub use schedule_processor::ScheduleProcessor;
pub use stats::ProcessingStats;
