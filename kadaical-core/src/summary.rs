//! Event summary text per grade.

use crate::grade::{Grade, PER_GRADE};
use crate::schedule::ScheduleRow;

/// Build the display text for one row as seen by one grade.
///
/// The all-grades text always comes first. The aggregate view then
/// appends a `[label] text` fragment for every grade that has one; a
/// single-grade view appends only its own fragment. Returns `None`
/// when the row has nothing to show this grade, in which case no event
/// is emitted at all.
pub fn build_summary(row: &ScheduleRow, grade: Grade) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();
    if let Some(text) = row.all_grades_text() {
        parts.push(text.to_string());
    }

    match grade {
        Grade::All => {
            for g in PER_GRADE {
                if let Some(text) = row.grade_text(g) {
                    parts.push(format!("[{}] {}", g.label(), text));
                }
            }
        }
        _ => {
            if let Some(text) = row.grade_text(grade) {
                parts.push(format!("[{}] {}", grade.label(), text));
            }
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}
