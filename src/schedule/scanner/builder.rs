use log::{debug, trace};

use crate::schedule::types::{FlatCourseRecord, Row, RowCounts};
use super::classifier::{classify, RowKind};

/// The builder's single piece of state: nothing open, or one section under construction
#[derive(Debug, Default)]
enum Cursor {
    #[default]
    Empty,
    Building(FlatCourseRecord),
}

impl Cursor {
    fn is_open(&self) -> bool {
        matches!(self, Cursor::Building(_))
    }

    /// Close the open record, if any
    fn take(&mut self) -> Option<FlatCourseRecord> {
        match std::mem::take(self) {
            Cursor::Building(record) => Some(record),
            Cursor::Empty => None,
        }
    }
}

/// Walks the rows of one sheet and emits a flat record per course section
#[derive(Debug, Default)]
pub struct CourseBuilder {
    cursor: Cursor,
    records: Vec<FlatCourseRecord>,
    counts: RowCounts,
}

impl CourseBuilder {
    /// Create a builder with nothing open
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the records of one sheet.
    ///
    /// Never fails: unclassifiable rows are dropped. Each call starts from an
    /// empty cursor, so sheets never leak state into each other.
    pub fn build(&mut self, rows: &[Row]) -> Vec<FlatCourseRecord> {
        self.cursor = Cursor::Empty;
        self.counts = RowCounts::default();

        for (index, row) in rows.iter().enumerate() {
            self.feed(index, row);
        }
        self.seal();

        debug!(
            "Built {} records from {} rows ({} headers, {} time rows, {} terminators, {} ignored)",
            self.records.len(),
            rows.len(),
            self.counts.headers,
            self.counts.time_rows,
            self.counts.terminators,
            self.counts.ignored
        );

        std::mem::take(&mut self.records)
    }

    /// Row classification counts of the last `build` call
    pub fn counts(&self) -> RowCounts {
        self.counts
    }

    fn feed(&mut self, index: usize, row: &Row) {
        let kind = classify(row, self.cursor.is_open());
        trace!("Row {}: {:?}", index, kind);

        match kind {
            RowKind::Header { code, section, name, instructor } => {
                self.counts.headers += 1;
                self.seal();
                self.cursor = Cursor::Building(FlatCourseRecord {
                    code,
                    section,
                    name,
                    instructor,
                    times: Vec::new(),
                    rooms: Vec::new(),
                });
            }
            RowKind::TimeRow { time, room } => {
                self.counts.time_rows += 1;
                if let Cursor::Building(record) = &mut self.cursor {
                    record.times.push(time);
                    if let Some(room) = room {
                        record.rooms.push(room);
                    }
                }
            }
            RowKind::Terminator => {
                self.counts.terminators += 1;
                self.seal();
            }
            RowKind::Ignored => {
                self.counts.ignored += 1;
            }
        }
    }

    fn seal(&mut self) {
        if let Some(record) = self.cursor.take() {
            trace!("Sealed {} section {}", record.code, record.section);
            self.records.push(record);
        }
    }
}

/// Build the flat records of one sheet with a fresh builder
pub fn build(rows: &[Row]) -> Vec<FlatCourseRecord> {
    CourseBuilder::new().build(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::types::Cell;
    use pretty_assertions::assert_eq;

    fn rows(lines: &[&[&str]]) -> Vec<Row> {
        lines.iter().map(|cells| Row::from(cells.to_vec())).collect()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn builds_single_course_with_times_and_rooms() {
        let input = rows(&[
            &["BSCR3001", "10", "Entrepreneurship", "3", "Naktal Al Kharousi"],
            &["MON 13:00-13:50", "T/T002"],
            &["TUE 13:00-13:50", "T/T002"],
        ]);

        assert_eq!(
            build(&input),
            vec![FlatCourseRecord {
                code: "BSCR3001".to_string(),
                section: "10".to_string(),
                name: "Entrepreneurship".to_string(),
                instructor: "Naktal Al Kharousi".to_string(),
                times: strings(&["MON 13:00-13:50", "TUE 13:00-13:50"]),
                rooms: strings(&["T/T002", "T/T002"]),
            }]
        );
    }

    #[test]
    fn new_header_seals_previous_record_first() {
        let input = rows(&[
            &["MATH1001", "1", "Calculus"],
            &["MON 08:00-08:50", "A1"],
            &["MATH1001", "2", "Calculus"],
            &["WED 08:00-08:50", "A2"],
        ]);

        let records = build(&input);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].section, "1");
        assert_eq!(records[0].times, strings(&["MON 08:00-08:50"]));
        assert_eq!(records[1].section, "2");
        assert_eq!(records[1].times, strings(&["WED 08:00-08:50"]));
    }

    #[test]
    fn terminator_seals_and_following_rows_are_ignored() {
        let input = rows(&[
            &["MATH1001", "1", "Calculus"],
            &["MON 08:00-08:50", "A1"],
            &["Course Code", "Section", "Name"],
            &["TUE 08:00-08:50", "A9"],
            &["Anything else"],
            &["PHYS2001", "3", "Mechanics"],
        ]);

        let mut builder = CourseBuilder::new();
        let records = builder.build(&input);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].times, strings(&["MON 08:00-08:50"]));
        assert_eq!(records[0].rooms, strings(&["A1"]));
        assert_eq!(records[1].code, "PHYS2001");
        assert!(records[1].times.is_empty());

        let counts = builder.counts();
        assert_eq!(counts.headers, 2);
        assert_eq!(counts.time_rows, 1);
        assert_eq!(counts.terminators, 1);
        assert_eq!(counts.ignored, 2);
        assert_eq!(counts.total(), input.len());
    }

    #[test]
    fn sub_header_with_blank_first_cell_seals() {
        let input = rows(&[
            &["MATH1001", "1", "Calculus"],
            &["", "Section group B"],
            &["MON 08:00-08:50", "A1"],
        ]);

        let records = build(&input);
        assert_eq!(records.len(), 1);
        assert!(records[0].times.is_empty());
    }

    #[test]
    fn end_of_stream_seals_exactly_once() {
        let input = rows(&[&["MATH1001", "1", "Calculus"], &["MON 08:00-08:50"]]);
        assert_eq!(build(&input).len(), 1);
    }

    #[test]
    fn rooms_only_follow_time_rows_that_carry_one() {
        let input = rows(&[
            &["MATH1001", "1", "Calculus"],
            &["MON 08:00-08:50", ""],
            &["TUE 08:00-08:50", "A1"],
            &["WED 08:00-08:50"],
        ]);

        let records = build(&input);
        assert_eq!(records[0].times.len(), 3);
        assert_eq!(records[0].rooms, strings(&["A1"]));
    }

    #[test]
    fn malformed_header_falls_through_to_open_record() {
        // Section cell is numeric zero, so this is not a header and not a time row.
        let input = vec![
            Row::from(vec!["MATH1001", "1", "Calculus"]),
            Row::new(vec![Cell::from("MATH1002"), Cell::Number(0.0)]),
            Row::from(vec!["MON 08:00-08:50", "A1"]),
        ];

        let records = build(&input);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].code, "MATH1001");
        assert_eq!(records[0].times, strings(&["MON 08:00-08:50"]));
    }

    #[test]
    fn empty_sheet_yields_nothing() {
        assert!(build(&[]).is_empty());
    }

    #[test]
    fn rows_before_first_header_are_ignored() {
        let input = rows(&[
            &["Spring Timetable"],
            &["MON 08:00-08:50", "A1"],
            &["", "Group A"],
            &["MATH1001", "1", "Calculus"],
        ]);

        let records = build(&input);
        assert_eq!(records.len(), 1);
        assert!(records[0].times.is_empty());
    }

    #[test]
    fn builder_is_reusable_across_sheets() {
        let mut builder = CourseBuilder::new();
        let first = builder.build(&rows(&[&["MATH1001", "1"], &["MON 08:00-08:50"]]));
        let second = builder.build(&rows(&[&["TUE 08:00-08:50", "A1"]]));

        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
    }
}
