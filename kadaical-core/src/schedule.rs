//! Yearly schedule files and their rows.
//!
//! One CSV file per academic year, UTF-8 with a header row. The header
//! names are the ones the school publishes, so they are bound here once
//! with `serde(rename = ...)` and the rest of the crate works with typed
//! fields instead of string-keyed column lookups.

use std::fmt;
use std::path::Path;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Deserialize;

use crate::error::{FeedError, FeedResult};
use crate::grade::Grade;

/// First month of the school year. April counts as already inside the
/// new academic year.
const ACADEMIC_YEAR_START_MONTH: u32 = 4;

/// An academic year, identified by the calendar year it starts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AcademicYear(pub u16);

impl AcademicYear {
    /// Resolve a query parameter into an academic year.
    ///
    /// A digits-only value is taken verbatim; anything else falls back
    /// to the academic year `today` belongs to.
    pub fn from_param(param: Option<&str>, today: NaiveDate) -> AcademicYear {
        param
            .filter(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|s| s.parse::<u16>().ok())
            .map(AcademicYear)
            .unwrap_or_else(|| AcademicYear::containing(today))
    }

    /// The academic year a calendar date belongs to.
    pub fn containing(date: NaiveDate) -> AcademicYear {
        let year = if date.month() >= ACADEMIC_YEAR_START_MONTH {
            date.year()
        } else {
            date.year() - 1
        };
        AcademicYear(year as u16)
    }
}

impl fmt::Display for AcademicYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One row of a yearly schedule file.
///
/// A row carries a date range plus free text per audience: one column
/// shown to every grade, and one column per grade 1-7. Any subset of
/// the text columns may be filled in.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleRow {
    #[serde(rename = "開始日")]
    pub start_date: NaiveDate,
    /// Empty in the file for single-day events.
    #[serde(rename = "終了日")]
    pub end_date: Option<NaiveDate>,
    #[serde(rename = "全学年予定")]
    all_grades: Option<String>,
    #[serde(rename = "1年個別予定")]
    year1: Option<String>,
    #[serde(rename = "2")]
    year2: Option<String>,
    #[serde(rename = "3")]
    year3: Option<String>,
    #[serde(rename = "4")]
    year4: Option<String>,
    #[serde(rename = "5")]
    year5: Option<String>,
    #[serde(rename = "専1")]
    advanced1: Option<String>,
    #[serde(rename = "専2")]
    advanced2: Option<String>,
}

impl ScheduleRow {
    /// Text shown to every grade, if the row has any.
    pub fn all_grades_text(&self) -> Option<&str> {
        non_empty(&self.all_grades)
    }

    /// Text specific to one grade. `Grade::All` has no column of its own.
    pub fn grade_text(&self, grade: Grade) -> Option<&str> {
        match grade {
            Grade::All => None,
            Grade::Year1 => non_empty(&self.year1),
            Grade::Year2 => non_empty(&self.year2),
            Grade::Year3 => non_empty(&self.year3),
            Grade::Year4 => non_empty(&self.year4),
            Grade::Year5 => non_empty(&self.year5),
            Grade::Advanced1 => non_empty(&self.advanced1),
            Grade::Advanced2 => non_empty(&self.advanced2),
        }
    }

    /// Last day of the event, inclusive.
    pub fn last_day(&self) -> NaiveDate {
        self.end_date.unwrap_or(self.start_date)
    }

    /// Exclusive end date for all-day events: a one-day event spanning
    /// only `start_date` ends on `start_date + 1 day`.
    pub fn end_exclusive(&self) -> NaiveDate {
        self.last_day() + Duration::days(1)
    }

    fn validate(&self) -> FeedResult<()> {
        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(FeedError::MalformedRow(format!(
                    "end date {} precedes start date {}",
                    end, self.start_date
                )));
            }
        }
        Ok(())
    }
}

fn non_empty(text: &Option<String>) -> Option<&str> {
    text.as_deref().filter(|s| !s.is_empty())
}

/// Load every row of a yearly schedule file.
///
/// A row that cannot be decoded (bad date, missing column) aborts the
/// whole load: a schedule file is small and curated, and a silent skip
/// would drop events without anyone noticing.
pub fn load_rows(path: &Path) -> FeedResult<Vec<ScheduleRow>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for record in reader.deserialize::<ScheduleRow>() {
        let row = record.map_err(|e| FeedError::MalformedRow(e.to_string()))?;
        row.validate()?;
        rows.push(row);
    }
    Ok(rows)
}
