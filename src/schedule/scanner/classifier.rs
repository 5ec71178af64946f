use once_cell::sync::Lazy;
use regex::Regex;

use crate::schedule::types::Row;

// Four uppercase Latin letters followed by four digits, e.g. BSCR3001
static COURSE_CODE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z]{4}[0-9]{4}$").expect("course code pattern is valid")
});

// A clock time anywhere in the cell, e.g. "MON 13:00-13:50"
static CLOCK_TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9]{2}:[0-9]{2}").expect("clock time pattern is valid")
});

/// First-cell phrases that close the course block above them
const TERMINATOR_PHRASES: [&str; 2] = ["course code", "college requirement"];

/// What a single row means to the course builder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    /// Starts a new course section
    Header {
        code: String,
        section: String,
        name: String,
        instructor: String,
    },

    /// One meeting time for the open section, optionally with a room
    TimeRow {
        time: String,
        room: Option<String>,
    },

    /// Closes the open section without starting a new one
    Terminator,

    /// Noise; no state change
    Ignored,
}

/// Whether `text` has the shape of a course code
pub fn is_course_code(text: &str) -> bool {
    COURSE_CODE_RE.is_match(text)
}

/// Whether `text` contains a clock time
pub fn has_clock_time(text: &str) -> bool {
    CLOCK_TIME_RE.is_match(text)
}

/// Classify a row.
///
/// Rules are tried in priority order: header, time row, terminator. The last
/// two only apply while a section is open (`open == true`); with nothing open
/// every non-header row is ignored.
pub fn classify(row: &Row, open: bool) -> RowKind {
    let code = row.cell(0).trimmed();

    if is_course_code(&code) && row.cell(1).is_truthy() {
        return RowKind::Header {
            code,
            section: row.cell(1).trimmed(),
            name: row.cell(2).trimmed(),
            instructor: row.cell(4).trimmed(),
        };
    }

    if !open {
        return RowKind::Ignored;
    }

    if has_clock_time(&code) {
        let room = row.cell(1).trimmed();
        return RowKind::TimeRow {
            time: code,
            room: if room.is_empty() { None } else { Some(room) },
        };
    }

    if is_terminator(row) {
        return RowKind::Terminator;
    }

    RowKind::Ignored
}

// The first cell is matched untrimmed: a whitespace-only cell is not blank.
fn is_terminator(row: &Row) -> bool {
    let first = row.cell(0).text().to_lowercase();

    TERMINATOR_PHRASES.iter().any(|phrase| first.contains(phrase))
        || (first.is_empty() && row.cell(1).is_truthy())
}
