use std::path::{Path, PathBuf};
use anyhow::{Result, Context};
use log::{info, debug};

use crate::schedule::types::CourseEntry;
use crate::utils::file_utils;

/// Reads and writes the converted course list
#[derive(Debug)]
pub struct ScheduleStorage {
    /// Path to the output file
    path: PathBuf,

    /// Write indented JSON
    pretty: bool,
}

impl ScheduleStorage {
    /// Create a storage for the given path, writing indented JSON
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            pretty: true,
        }
    }

    /// Write single-line JSON instead
    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }

    /// Serialize courses to a JSON string
    pub fn to_json(&self, courses: &[CourseEntry]) -> Result<String> {
        let content = if self.pretty {
            serde_json::to_string_pretty(courses)
        } else {
            serde_json::to_string(courses)
        };
        content.context("Failed to serialize courses")
    }

    /// Save the course list to disk, creating parent directories
    pub fn save(&self, courses: &[CourseEntry]) -> Result<()> {
        debug!("Saving courses to {}", self.path.display());

        let content = self.to_json(courses)?;
        file_utils::write_string_to_file(&self.path, &content)?;

        info!("Saved {} courses to {}", courses.len(), self.path.display());
        Ok(())
    }

    /// Load a previously saved course list
    pub fn load(&self) -> Result<Vec<CourseEntry>> {
        let path = &self.path;
        debug!("Loading courses from {}", path.display());

        let content = file_utils::read_file_to_string(path)?;
        let courses: Vec<CourseEntry> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse course file {}", path.display()))?;

        info!("Loaded {} courses", courses.len());
        Ok(courses)
    }

    /// Get the path to the output file
    pub fn path(&self) -> &Path {
        &self.path
    }
}
