use std::collections::HashMap;
use log::{debug, trace};

use crate::schedule::types::{CourseEntry, FlatCourseRecord, SectionEntry};

/// Separator between meeting times in a section's `time`
pub const TIME_SEPARATOR: &str = " | ";

/// Separator between rooms in a section's `room`
pub const ROOM_SEPARATOR: &str = " / ";

/// Counters describing one aggregation pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MergeStats {
    /// Records whose (code, section) was already seen
    pub duplicate_sections: usize,

    /// Duplicates whose time string was appended to the existing section
    pub merged_times: usize,
}

// Sections of one course, kept in first-seen order with an index for lookup
#[derive(Debug)]
struct CourseSlot {
    entry: CourseEntry,
    section_index: HashMap<String, usize>,
}

/// Merge flat records into courses and sections.
///
/// Courses come out in first-seen order of their code, sections in first-seen
/// order within their course.
pub fn aggregate(records: &[FlatCourseRecord]) -> Vec<CourseEntry> {
    aggregate_with_stats(records).0
}

/// Like [`aggregate`], also reporting how many duplicates were folded in
pub fn aggregate_with_stats(records: &[FlatCourseRecord]) -> (Vec<CourseEntry>, MergeStats) {
    let mut slots: Vec<CourseSlot> = Vec::new();
    let mut course_index: HashMap<&str, usize> = HashMap::new();
    let mut stats = MergeStats::default();

    for record in records {
        let time = record.times.join(TIME_SEPARATOR);
        let room = record.rooms.join(ROOM_SEPARATOR);

        let slot_idx = *course_index.entry(record.code.as_str()).or_insert_with(|| {
            let name = if record.name.is_empty() {
                record.code.clone()
            } else {
                record.name.clone()
            };
            slots.push(CourseSlot {
                entry: CourseEntry {
                    id: record.code.clone(),
                    code: record.code.clone(),
                    name,
                    sections: Vec::new(),
                },
                section_index: HashMap::new(),
            });
            slots.len() - 1
        });
        let slot = &mut slots[slot_idx];

        match slot.section_index.get(&record.section) {
            Some(&idx) => {
                stats.duplicate_sections += 1;
                let existing = &mut slot.entry.sections[idx];
                // Only the time is merged; room keeps its first-seen value
                if !time.is_empty() && !existing.time.contains(&time) {
                    trace!("Merging time '{}' into {} section {}", time, record.code, record.section);
                    existing.time.push_str(TIME_SEPARATOR);
                    existing.time.push_str(&time);
                    stats.merged_times += 1;
                }
            }
            None => {
                slot.section_index.insert(record.section.clone(), slot.entry.sections.len());
                slot.entry.sections.push(SectionEntry {
                    section: record.section.clone(),
                    instructor: record.instructor.clone(),
                    time,
                    room,
                    exam: String::new(),
                });
            }
        }
    }

    debug!(
        "Aggregated {} records into {} courses ({} duplicate sections)",
        records.len(),
        slots.len(),
        stats.duplicate_sections
    );

    let courses = slots.into_iter().map(|slot| slot.entry).collect();
    (courses, stats)
}
