use std::path::{Path, PathBuf};
use anyhow::{bail, Result};
use log::{debug, trace};
use walkdir::WalkDir;

/// File collector for finding timetable exports
#[derive(Debug)]
pub struct FileCollector {
    /// Valid file extensions to collect
    valid_extensions: Vec<String>,

    /// Whether to descend into subdirectories
    recursive: bool,
}

impl Default for FileCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl FileCollector {
    /// Create a collector for `.xls` and `.xlsx` files in the top-level directory
    pub fn new() -> Self {
        Self {
            valid_extensions: vec!["xls".to_string(), "xlsx".to_string()],
            recursive: false,
        }
    }

    /// Descend into subdirectories as well
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Collect matching files from the input directory, sorted by path
    pub fn collect_files(&self, input_dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let input_dir = input_dir.as_ref();
        debug!("Collecting files from directory: {}", input_dir.display());

        if !input_dir.is_dir() {
            bail!("Input directory not found: {}", input_dir.display());
        }

        let mut walker = WalkDir::new(input_dir).follow_links(true).min_depth(1);
        if !self.recursive {
            walker = walker.max_depth(1);
        }

        let mut files = Vec::new();
        for entry in walker
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            if self.matches(entry.path()) {
                trace!("Found file: {}", entry.path().display());
                files.push(entry.path().to_owned());
            }
        }

        // Record order downstream depends on file order
        files.sort();

        debug!("Collected {} files for processing", files.len());
        Ok(files)
    }

    /// Whether the path carries one of the valid extensions
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.valid_extensions.iter().any(|valid| ext.eq_ignore_ascii_case(valid)))
            .unwrap_or(false)
    }
}
