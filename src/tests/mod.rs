use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::schedule::processor::{aggregate, ScheduleProcessor};
use crate::schedule::scanner::build;
use crate::schedule::types::{CourseEntry, FlatCourseRecord, Row, SectionEntry, SheetRows};

// Rows decoded from JSON, the way the inspection dump prints them
fn rows_from_json(value: serde_json::Value) -> Result<Vec<Row>> {
    Ok(serde_json::from_value(value)?)
}

#[test]
fn test_single_course_end_to_end() -> Result<()> {
    let rows = rows_from_json(json!([
        ["BSCR3001", "10", "Entrepreneurship", "3", "Naktal Al Kharousi"],
        ["MON 13:00-13:50", "T/T002"],
        ["TUE 13:00-13:50", "T/T002"]
    ]))?;

    let records = build(&rows);
    assert_eq!(
        records,
        vec![FlatCourseRecord {
            code: "BSCR3001".to_string(),
            section: "10".to_string(),
            name: "Entrepreneurship".to_string(),
            instructor: "Naktal Al Kharousi".to_string(),
            times: vec!["MON 13:00-13:50".to_string(), "TUE 13:00-13:50".to_string()],
            rooms: vec!["T/T002".to_string(), "T/T002".to_string()],
        }]
    );

    assert_eq!(
        aggregate(&records),
        vec![CourseEntry {
            id: "BSCR3001".to_string(),
            code: "BSCR3001".to_string(),
            name: "Entrepreneurship".to_string(),
            sections: vec![SectionEntry {
                section: "10".to_string(),
                instructor: "Naktal Al Kharousi".to_string(),
                time: "MON 13:00-13:50 | TUE 13:00-13:50".to_string(),
                room: "T/T002 / T/T002".to_string(),
                exam: String::new(),
            }],
        }]
    );
    Ok(())
}

#[test]
fn test_numeric_cells_from_the_decoder() -> Result<()> {
    // Section and credits often arrive as numbers
    let rows = rows_from_json(json!([
        [null, null, "Spring timetable"],
        ["Course Code", "Section", "Course Name", "Credit", "Lecturer"],
        ["MATH1001", 2, "Calculus I", 3, "A. Rahman"],
        ["SUN 08:00-09:15", "B/101"],
        [null, "Section group"],
        ["MATH1001", 0, "Calculus I", 3, "Nobody"],
        ["MON 08:00-09:15", "B/102"],
        ["MATH1002", "1", "", 3, null],
        ["WED 10:00-10:50"]
    ]))?;

    let records = build(&rows);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].section, "2");
    assert_eq!(records[0].times, vec!["SUN 08:00-09:15".to_string()]);
    assert_eq!(records[1].code, "MATH1002");
    assert_eq!(records[1].instructor, "");
    assert!(records[1].rooms.is_empty());

    let courses = aggregate(&records);
    assert_eq!(courses[1].name, "MATH1002");
    Ok(())
}

#[test]
fn test_terminator_then_noise_until_next_header() -> Result<()> {
    let sheet = SheetRows {
        name: "Sheet1".to_string(),
        rows: rows_from_json(json!([
            ["ACCT2001", "1", "Accounting", "3", "R. Said"],
            ["MON 09:00-09:50", "C/201"],
            ["College Requirement Courses"],
            ["THU 09:00-09:50", "C/999"],
            ["ACCT2001", "2", "Accounting", "3", "R. Said"],
            ["TUE 09:00-09:50", "C/202"]
        ]))?,
    };

    let result = ScheduleProcessor::with_defaults().process_sheets(&[sheet]);
    assert_eq!(result.courses.len(), 1);

    let sections = &result.courses[0].sections;
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].time, "MON 09:00-09:50");
    assert_eq!(sections[0].room, "C/201");
    assert_eq!(sections[1].time, "TUE 09:00-09:50");
    assert_eq!(result.stats.rows.terminators, 1);
    assert_eq!(result.stats.rows.ignored, 1);
    Ok(())
}

#[test]
fn test_process_sheets_is_deterministic() -> Result<()> {
    let sheets = vec![
        SheetRows {
            name: "A".to_string(),
            rows: rows_from_json(json!([
                ["PHYS2001", "3", "Mechanics"],
                ["MON 08:00-08:50", "L1"],
                ["MATH1001", "1", "Calculus"]
            ]))?,
        },
        SheetRows {
            name: "B".to_string(),
            rows: rows_from_json(json!([
                ["PHYS2001", "1", "Mechanics"],
                ["PHYS2001", "3", "Mechanics"],
                ["WED 08:00-08:50", "L2"]
            ]))?,
        },
    ];

    let processor = ScheduleProcessor::with_defaults();
    let first = processor.process_sheets(&sheets);
    let second = processor.process_sheets(&sheets);
    assert_eq!(first.courses, second.courses);

    let phys = &first.courses[0];
    let order: Vec<&str> = phys.sections.iter().map(|s| s.section.as_str()).collect();
    assert_eq!(order, vec!["3", "1"]);
    assert_eq!(phys.sections[0].time, "MON 08:00-08:50 | WED 08:00-08:50");
    assert_eq!(phys.sections[0].room, "L1");
    Ok(())
}
