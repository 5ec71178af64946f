use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use log::{debug, trace};

use crate::schedule::types::{Cell, Row, SheetRows};

/// An opened spreadsheet file
pub struct Workbook {
    path: PathBuf,
    sheets: Sheets<BufReader<File>>,
}

impl Workbook {
    /// Open a `.xls` or `.xlsx` file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Opening workbook: {}", path.display());

        let sheets = open_workbook_auto(path)
            .with_context(|| format!("Failed to open workbook {}", path.display()))?;

        Ok(Self {
            path: path.to_path_buf(),
            sheets,
        })
    }

    /// Worksheet names in workbook order
    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names()
    }

    /// Decode one worksheet into rows
    pub fn read_sheet(&mut self, name: &str) -> Result<SheetRows> {
        let range = self.sheets
            .worksheet_range(name)
            .with_context(|| format!("Failed to read sheet '{}' of {}", name, self.path.display()))?;

        let rows = range_to_rows(&range);
        trace!("Sheet '{}' of {}: {} rows", name, self.path.display(), rows.len());

        Ok(SheetRows {
            name: name.to_string(),
            rows,
        })
    }

    /// Decode the first worksheet, or all of them
    pub fn read_sheets(&mut self, all_sheets: bool) -> Result<Vec<SheetRows>> {
        let names = self.sheet_names();
        let names: Vec<String> = if all_sheets {
            names
        } else {
            names.into_iter().take(1).collect()
        };

        names.iter().map(|name| self.read_sheet(name)).collect()
    }

    /// Decode a sheet by name, or the first sheet when no name is given
    pub fn read_named_or_first(&mut self, name: Option<&str>) -> Result<SheetRows> {
        let name = match name {
            Some(name) => name.to_string(),
            None => self.sheet_names()
                .into_iter()
                .next()
                .ok_or_else(|| anyhow!("Workbook {} has no sheets", self.path.display()))?,
        };

        self.read_sheet(&name)
    }
}

/// Convert a calamine range into rows.
///
/// Columns count from the first used column, so a table that starts in
/// column B still has its course code at index 0. Leading empty rows are
/// padded back so row positions match the sheet.
pub fn range_to_rows(range: &Range<Data>) -> Vec<Row> {
    let start_row = match range.start() {
        Some((row, _)) => row as usize,
        None => return Vec::new(),
    };

    let mut rows = Vec::with_capacity(start_row + range.height());
    rows.extend(std::iter::repeat_with(Row::default).take(start_row));

    for cells in range.rows() {
        let mut row: Vec<Cell> = cells.iter().map(data_to_cell).collect();

        // Trailing blanks carry no meaning and would only pad the dump output
        while matches!(row.last(), Some(Cell::Empty)) {
            row.pop();
        }
        rows.push(Row::new(row));
    }

    rows
}

/// Map a calamine cell onto the row model
pub fn data_to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::Bool(b) => Cell::Bool(*b),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::String(s) => Cell::Text(s.clone()),
        // Date serials stay numeric, like the raw cell value
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Text(e.to_string()),
    }
}
