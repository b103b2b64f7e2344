//! Feed generation: one schedule file in, one ICS document out.

use std::path::Path;

use crate::error::{FeedError, FeedResult};
use crate::grade::Grade;
use crate::ics::CalendarDocument;
use crate::schedule::{self, AcademicYear};

/// Generate the full ICS feed for one academic year and grade.
///
/// Reads `<schedule_dir>/<year>.csv`, feeds every row through the
/// document, and renders it. A missing file for the year is the only
/// not-found condition; a row that fails to parse aborts the whole
/// request.
pub fn generate_feed(
    schedule_dir: &Path,
    year: AcademicYear,
    grade: Grade,
) -> FeedResult<String> {
    let path = schedule_dir.join(format!("{year}.csv"));
    if !path.is_file() {
        return Err(FeedError::YearNotFound(year.0));
    }

    let rows = schedule::load_rows(&path)?;
    let mut document = CalendarDocument::new(grade);
    for row in &rows {
        document.add_event(row);
    }
    Ok(document.render())
}
