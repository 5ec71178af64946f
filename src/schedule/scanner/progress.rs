use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

/// Below this many files no progress bar is drawn
const MIN_FILES_FOR_BAR: usize = 10;

/// Progress tracker for per-file work
#[derive(Debug, Default)]
pub struct ProgressTracker {}

impl ProgressTracker {
    /// Create a new progress tracker
    pub fn new() -> Self {
        Self {}
    }

    /// Run `operation` over every path in parallel.
    ///
    /// Results come back in the same order as `paths`, whatever order the
    /// workers finish in.
    pub fn track_path_progress<F, R>(&self, paths: &[PathBuf], operation: F) -> Vec<R>
    where
        F: Fn(&PathBuf) -> R + Sync + Send,
        R: Send,
    {
        let progress_bar = if paths.len() > MIN_FILES_FOR_BAR {
            let pb = ProgressBar::new(paths.len() as u64);
            if let Ok(style) = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({eta}) {msg}")
            {
                pb.set_style(style.progress_chars("#>-"));
            }
            Some(pb)
        } else {
            None
        };

        let processed_count = AtomicUsize::new(0);

        let results: Vec<R> = paths.par_iter()
            .map(|path| {
                let result = operation(path);

                let current_count = processed_count.fetch_add(1, Ordering::SeqCst) + 1;
                if let Some(pb) = &progress_bar {
                    pb.set_position(current_count as u64);
                    if let Some(file_name) = path.file_name() {
                        pb.set_message(file_name.to_string_lossy().to_string());
                    }
                }

                result
            })
            .collect();

        if let Some(pb) = progress_bar {
            pb.finish_with_message("Processing complete");
        }

        results
    }
}
