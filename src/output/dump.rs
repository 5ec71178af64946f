use anyhow::{Context, Result};

use crate::schedule::types::Row;

/// Render the first `limit` rows as indented JSON for manual review
pub fn dump_rows(rows: &[Row], limit: usize) -> Result<String> {
    let head = &rows[..rows.len().min(limit)];
    serde_json::to_string_pretty(head).context("Failed to serialize rows")
}
