use std::fmt;
use std::path::PathBuf;
use serde::{Serialize, Deserialize};

/// A single spreadsheet cell as delivered by the decoder
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// Missing or blank cell
    #[default]
    Empty,

    /// Boolean cell
    Bool(bool),

    /// Numeric cell (integers, floats and date serials)
    Number(f64),

    /// Text cell
    Text(String),
}

impl Cell {
    /// Whether the cell counts as present in the export's truthiness model.
    ///
    /// Blank text, `false`, zero and NaN are all absent; the text `"0"` is present.
    pub fn is_truthy(&self) -> bool {
        match self {
            Cell::Empty => false,
            Cell::Bool(b) => *b,
            Cell::Number(n) => *n != 0.0 && !n.is_nan(),
            Cell::Text(s) => !s.is_empty(),
        }
    }

    /// Text of the cell, or an empty string when the cell is falsy
    pub fn text(&self) -> String {
        if !self.is_truthy() {
            return String::new();
        }

        match self {
            Cell::Empty => String::new(),
            Cell::Bool(b) => b.to_string(),
            Cell::Number(n) => format_number(*n),
            Cell::Text(s) => s.clone(),
        }
    }

    /// Trimmed text of the cell
    pub fn trimmed(&self) -> String {
        self.text().trim().to_string()
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Bool(value)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

// Integral values print without a fractional part: 10.0 -> "10"
fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}

static EMPTY_CELL: Cell = Cell::Empty;

/// One physical line of the printed timetable
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(pub Vec<Cell>);

impl Row {
    /// Create a row from its cells
    pub fn new(cells: Vec<Cell>) -> Self {
        Self(cells)
    }

    /// Cell at `index`, reading past the end of the row as empty
    pub fn cell(&self, index: usize) -> &Cell {
        self.0.get(index).unwrap_or(&EMPTY_CELL)
    }

    /// Number of cells in the row
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the row has no cells at all
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T: Into<Cell>> From<Vec<T>> for Row {
    fn from(cells: Vec<T>) -> Self {
        Row(cells.into_iter().map(Into::into).collect())
    }
}

/// The decoded rows of one worksheet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetRows {
    /// Worksheet name
    pub name: String,

    /// Rows in sheet order
    pub rows: Vec<Row>,
}

/// One course section as read from a single sheet, before merging
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatCourseRecord {
    /// Course code, e.g. BSCR3001
    pub code: String,

    /// Section identifier within the course
    pub section: String,

    /// Human readable title, may be empty
    pub name: String,

    /// Instructor name, may be empty
    pub instructor: String,

    /// Raw meeting time strings in row order
    pub times: Vec<String>,

    /// Raw room strings; not index-aligned with `times`
    pub rooms: Vec<String>,
}

/// One section of an aggregated course
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionEntry {
    pub section: String,
    pub instructor: String,

    /// Meeting times joined with `" | "`
    pub time: String,

    /// Rooms joined with `" / "`
    pub room: String,

    /// Always empty; no export carries exam data yet
    pub exam: String,
}

/// A course with its deduplicated sections
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseEntry {
    pub id: String,
    pub code: String,
    pub name: String,
    pub sections: Vec<SectionEntry>,
}

/// Statistics about a conversion run
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ConvertStats {
    /// Total number of spreadsheet files processed
    pub total_files: usize,

    /// Number of files that yielded at least one record
    pub files_with_courses: usize,

    /// Number of files that decoded but yielded no records
    pub empty_files: usize,

    /// Number of files that failed to decode
    pub error_files: usize,

    /// Paths to files that failed to decode
    pub error_file_paths: Vec<PathBuf>,

    /// Number of sheets run through the course builder
    pub sheets_processed: usize,

    /// Number of sheets without any rows
    pub empty_sheets: usize,

    /// Number of flat records emitted by the builder
    pub flat_records: usize,

    /// Number of distinct courses after aggregation
    pub courses: usize,

    /// Number of distinct sections after aggregation
    pub sections: usize,

    /// Number of records folded into an already seen section
    pub duplicate_sections: usize,

    /// Row classification counts across all sheets
    pub rows: RowCounts,
}

/// Per-kind row classification counts
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowCounts {
    pub headers: usize,
    pub time_rows: usize,
    pub terminators: usize,
    pub ignored: usize,
}

impl RowCounts {
    /// Add another set of counts into this one
    pub fn merge(&mut self, other: &Self) {
        self.headers += other.headers;
        self.time_rows += other.time_rows;
        self.terminators += other.terminators;
        self.ignored += other.ignored;
    }

    /// Total number of rows seen
    pub fn total(&self) -> usize {
        self.headers + self.time_rows + self.terminators + self.ignored
    }
}

/// Configuration options for a conversion run
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Whether to log verbose error information
    pub verbose_errors: bool,

    /// Maximum number of files to process
    pub max_files: Option<usize>,

    /// Number of parallel threads to use for decoding
    pub parallel_threads: Option<usize>,

    /// Process every worksheet instead of only the first one
    pub all_sheets: bool,

    /// Descend into subdirectories of the input directory
    pub recursive: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            verbose_errors: false,
            max_files: None,
            parallel_threads: None,
            all_sheets: false,
            recursive: false,
        }
    }
}

/// Result of a conversion run
#[derive(Debug, Clone, Default)]
pub struct ConvertResult {
    /// Aggregated courses in first-seen order
    pub courses: Vec<CourseEntry>,

    /// Statistics about the run
    pub stats: ConvertStats,
}
