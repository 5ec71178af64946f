use std::path::PathBuf;

use crate::schedule::scanner::SheetScan;
use crate::schedule::types::{ConvertStats, RowCounts};

/// Statistics for sheet and file processing
#[derive(Debug, Default, Clone)]
pub struct ProcessingStats {
    /// Total number of files processed
    pub total_files: usize,

    /// Number of files that yielded records
    pub files_with_courses: usize,

    /// Number of files that yielded no records
    pub empty_files: usize,

    /// Number of files that failed to decode
    pub error_files: usize,

    /// Paths to files that failed to decode
    pub error_file_paths: Vec<PathBuf>,

    /// Number of sheets processed
    pub sheets_processed: usize,

    /// Number of sheets without rows
    pub empty_sheets: usize,

    /// Number of flat records built
    pub flat_records: usize,

    /// Row classification counts
    pub rows: RowCounts,
}

impl ProcessingStats {
    /// Create a new processing stats instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for the sheets of one decoded file
    pub fn record_file(&mut self, sheets: &[SheetScan]) {
        self.total_files += 1;

        let records: usize = sheets.iter().map(|s| s.records.len()).sum();
        if records == 0 {
            self.empty_files += 1;
        } else {
            self.files_with_courses += 1;
        }

        for sheet in sheets {
            self.record_sheet(sheet);
        }
    }

    /// Account for one scanned sheet
    pub fn record_sheet(&mut self, sheet: &SheetScan) {
        self.sheets_processed += 1;
        if sheet.row_count == 0 {
            self.empty_sheets += 1;
        }
        self.flat_records += sheet.records.len();
        self.rows.merge(&sheet.counts);
    }

    /// Account for a file that failed to decode
    pub fn record_error(&mut self, path: PathBuf) {
        self.total_files += 1;
        self.error_files += 1;
        self.error_file_paths.push(path);
    }

    /// Merge another stats instance into this one
    pub fn merge(&mut self, other: &Self) {
        self.total_files += other.total_files;
        self.files_with_courses += other.files_with_courses;
        self.empty_files += other.empty_files;
        self.error_files += other.error_files;
        self.error_file_paths.extend(other.error_file_paths.iter().cloned());
        self.sheets_processed += other.sheets_processed;
        self.empty_sheets += other.empty_sheets;
        self.flat_records += other.flat_records;
        self.rows.merge(&other.rows);
    }

    /// Calculate the number of files that were skipped (empty + error)
    pub fn skipped_files(&self) -> usize {
        self.empty_files + self.error_files
    }

    /// Calculate the percentage of files that yielded courses
    pub fn success_rate(&self) -> f64 {
        if self.total_files == 0 {
            return 0.0;
        }

        let successful = self.total_files - self.skipped_files();
        (successful as f64 / self.total_files as f64) * 100.0
    }

    /// Fold into the run summary
    pub fn into_convert_stats(self) -> ConvertStats {
        ConvertStats {
            total_files: self.total_files,
            files_with_courses: self.files_with_courses,
            empty_files: self.empty_files,
            error_files: self.error_files,
            error_file_paths: self.error_file_paths,
            sheets_processed: self.sheets_processed,
            empty_sheets: self.empty_sheets,
            flat_records: self.flat_records,
            rows: self.rows,
            ..ConvertStats::default()
        }
    }
}
