use std::path::{Path, PathBuf};

use anyhow::Result;
use log::{debug, error, info, warn};

use crate::schedule::scanner::{FileScan, SheetScan, SheetScanner};
use crate::schedule::types::{ConvertOptions, ConvertResult, FlatCourseRecord, SheetRows};
use super::aggregator::aggregate_with_stats;
use super::stats::ProcessingStats;

/// Schedule processor: runs every sheet through the builder, then aggregates
#[derive(Debug)]
pub struct ScheduleProcessor {
    /// Configuration options for processing
    options: ConvertOptions,

    /// Scanner turning files and sheets into flat records
    scanner: SheetScanner,
}

impl ScheduleProcessor {
    /// Create a new schedule processor with the given options
    pub fn new(options: ConvertOptions) -> Self {
        Self {
            scanner: SheetScanner::new(options.clone()),
            options,
        }
    }

    /// Create a new schedule processor with default options
    pub fn with_defaults() -> Self {
        Self::new(ConvertOptions::default())
    }

    /// Convert every spreadsheet in a directory.
    ///
    /// A missing directory is an error. A directory without spreadsheets
    /// yields an empty result after a warning.
    pub fn convert_directory(&self, input_dir: impl AsRef<Path>) -> Result<ConvertResult> {
        let input_dir = input_dir.as_ref();
        info!("Looking for files in: {}", input_dir.display());

        let files = self.scanner.collect_files(input_dir)?;
        if files.is_empty() {
            warn!("No spreadsheet files found in {}", input_dir.display());
            return Ok(ConvertResult::default());
        }

        info!("Found {} files to process", files.len());
        Ok(self.process_files(&files))
    }

    /// Convert specific files; records are concatenated in the order given
    pub fn process_files(&self, files: &[PathBuf]) -> ConvertResult {
        info!("Processing {} files", files.len());

        let scans = self.scanner.scan_files_parallel(files);

        let mut stats = ProcessingStats::new();
        let mut records: Vec<FlatCourseRecord> = Vec::new();

        for FileScan { path, outcome } in scans {
            match outcome {
                Ok(sheets) => {
                    info!("Processed {}", path.display());
                    stats.record_file(&sheets);
                    records.extend(sheets.into_iter().flat_map(|sheet| sheet.records));
                }
                Err(e) => {
                    if self.options.verbose_errors {
                        error!("Failed to process {}: {:?}", path.display(), e);
                    } else {
                        warn!("Failed to process {}: {}", path.display(), e);
                    }
                    stats.record_error(path);
                }
            }
        }

        self.finish(records, stats)
    }

    /// Convert sheets that are already decoded; each gets its own cursor
    pub fn process_sheets(&self, sheets: &[SheetRows]) -> ConvertResult {
        let mut stats = ProcessingStats::new();
        let mut records: Vec<FlatCourseRecord> = Vec::new();

        for sheet in sheets {
            let scan: SheetScan = self.scanner.scan_sheet(sheet);
            debug!("Sheet '{}': {} records", scan.name, scan.records.len());
            stats.record_sheet(&scan);
            records.extend(scan.records);
        }

        self.finish(records, stats)
    }

    fn finish(&self, records: Vec<FlatCourseRecord>, stats: ProcessingStats) -> ConvertResult {
        let (courses, merge) = aggregate_with_stats(&records);

        let mut stats = stats.into_convert_stats();
        stats.courses = courses.len();
        stats.sections = courses.iter().map(|c| c.sections.len()).sum();
        stats.duplicate_sections = merge.duplicate_sections;

        info!(
            "Built {} records from {} sheets into {} courses with {} sections",
            stats.flat_records, stats.sheets_processed, stats.courses, stats.sections
        );
        if stats.error_files > 0 {
            warn!("{} files could not be read", stats.error_files);
        }

        ConvertResult { courses, stats }
    }
}
