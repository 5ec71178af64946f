pub mod builder;
pub mod classifier;
mod file_collector;
mod progress;
pub mod workbook;

use std::path::{Path, PathBuf};
use anyhow::Result;
use log::{debug, warn};

use crate::schedule::types::{ConvertOptions, FlatCourseRecord, RowCounts, SheetRows};

// Re-export from submodules
pub use builder::{build, CourseBuilder};
pub use classifier::{classify, RowKind};
pub use file_collector::FileCollector;
pub use progress::ProgressTracker;
pub use workbook::Workbook;

/// Builder output for one worksheet
#[derive(Debug, Clone, Default)]
pub struct SheetScan {
    /// Worksheet name
    pub name: String,

    /// Number of rows in the sheet
    pub row_count: usize,

    /// Records in sheet order
    pub records: Vec<FlatCourseRecord>,

    /// Row classification counts
    pub counts: RowCounts,
}

/// Scan outcome for one spreadsheet file
#[derive(Debug)]
pub struct FileScan {
    /// Path of the file
    pub path: PathBuf,

    /// Per-sheet results, or the decode error
    pub outcome: Result<Vec<SheetScan>>,
}

/// Sheet scanner responsible for finding exports and turning sheets into flat records
#[derive(Debug)]
pub struct SheetScanner {
    /// Configuration options for scanning
    options: ConvertOptions,

    /// File collector for finding spreadsheet files
    file_collector: FileCollector,

    /// Progress tracker for displaying progress
    progress_tracker: ProgressTracker,
}

impl SheetScanner {
    /// Create a new sheet scanner with the given options
    pub fn new(options: ConvertOptions) -> Self {
        Self {
            file_collector: FileCollector::new().recursive(options.recursive),
            progress_tracker: ProgressTracker::new(),
            options,
        }
    }

    /// Create a new sheet scanner with default options
    pub fn with_defaults() -> Self {
        Self::new(ConvertOptions::default())
    }

    /// Collect all spreadsheet files from the input directory
    pub fn collect_files(&self, input_dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        self.file_collector.collect_files(input_dir)
    }

    /// Run one decoded sheet through a fresh course builder
    pub fn scan_sheet(&self, sheet: &SheetRows) -> SheetScan {
        let mut builder = CourseBuilder::new();
        let records = builder.build(&sheet.rows);

        SheetScan {
            name: sheet.name.clone(),
            row_count: sheet.rows.len(),
            records,
            counts: builder.counts(),
        }
    }

    /// Decode a file and scan its first sheet, or every sheet
    pub fn scan_file(&self, file: impl AsRef<Path>) -> Result<Vec<SheetScan>> {
        let file = file.as_ref();
        debug!("Processing file: {}", file.display());

        let mut workbook = Workbook::open(file)?;
        let sheets = workbook.read_sheets(self.options.all_sheets)?;

        Ok(sheets.iter().map(|sheet| self.scan_sheet(sheet)).collect())
    }

    /// Scan files in parallel; results keep the order of `files`
    pub fn scan_files_parallel(&self, files: &[PathBuf]) -> Vec<FileScan> {
        let files = match self.options.max_files {
            Some(max_files) if files.len() > max_files => {
                warn!("Limiting to {} files out of {}", max_files, files.len());
                &files[..max_files]
            }
            _ => files,
        };

        let thread_count = self.options.parallel_threads.unwrap_or_else(|| {
            let available = num_cpus::get();
            let used = std::cmp::max(1, available.saturating_sub(1));
            debug!("Using {} threads for parallel processing (available: {})", used, available);
            used
        });

        let scan = || {
            self.progress_tracker.track_path_progress(files, |file| FileScan {
                path: file.clone(),
                outcome: self.scan_file(file),
            })
        };

        match rayon::ThreadPoolBuilder::new().num_threads(thread_count).build() {
            Ok(pool) => pool.install(scan),
            Err(e) => {
                warn!("Failed to build thread pool, using the global pool: {}", e);
                scan()
            }
        }
    }
}
