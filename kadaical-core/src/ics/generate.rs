//! ICS feed generation.

use chrono::{NaiveDate, Utc};
use icalendar::{Calendar, Component, Property, ValueType};

use crate::grade::Grade;
use crate::schedule::ScheduleRow;
use crate::summary::build_summary;

/// Product identifier emitted in every feed.
const PRODID: &str = "-//jugyobot//q55mehqs//KadaiCalendar//JP";

/// One feed document under construction: fixed calendar headers plus
/// one VEVENT per qualifying schedule row, in insertion order.
///
/// Built per request and discarded after `render`.
pub struct CalendarDocument {
    grade: Grade,
    calendar: Calendar,
    events: usize,
}

impl CalendarDocument {
    pub fn new(grade: Grade) -> Self {
        let mut calendar = Calendar::new();
        calendar
            .name(&format!("仙台高専 年間行事予定 ({})", grade.label()))
            .description(&format!("仙台高専 {}の年間行事予定", grade.label()))
            .timezone("Asia/Tokyo")
            .append_property(Property::new("METHOD", "PUBLISH"));

        CalendarDocument {
            grade,
            calendar,
            events: 0,
        }
    }

    /// Append a VEVENT for this row, or nothing if the row has no text
    /// for this feed's grade.
    ///
    /// The all-grades feed only carries rows explicitly marked as
    /// relevant to every grade; rows that exist purely for individual
    /// grades stay out of it.
    pub fn add_event(&mut self, row: &ScheduleRow) {
        if self.grade == Grade::All && row.all_grades_text().is_none() {
            return;
        }
        let Some(summary) = build_summary(row, self.grade) else {
            return;
        };

        let mut event = icalendar::Event::new();
        // Deterministic UID so feed readers can de-duplicate across refreshes
        event.uid(&format!(
            "{}-g{}-{}@kadaical",
            row.start_date.format("%Y%m%d"),
            self.grade.number(),
            self.events
        ));
        event.add_property("DTSTAMP", Utc::now().format("%Y%m%dT%H%M%SZ").to_string());
        add_date_property(&mut event, "DTSTART", row.start_date);
        add_date_property(&mut event, "DTEND", row.end_exclusive());
        event.summary(&summary);
        event.description(&summary);

        self.calendar.push(event.done());
        self.events += 1;
    }

    /// Render the full document, CRLF line endings throughout.
    pub fn render(&self) -> String {
        clean_ics_output(&self.calendar.to_string())
    }
}

/// Add an all-day date property (`VALUE=DATE`, `YYYYMMDD`).
fn add_date_property(event: &mut icalendar::Event, name: &str, date: NaiveDate) {
    let mut prop = Property::new(name, date.format("%Y%m%d").to_string());
    prop.append_parameter(ValueType::Date);
    event.append_property(prop);
}

/// Clean up ICS output from the icalendar crate
/// - Replace the crate's PRODID with ours
/// - Drop the calendar-level NAME/DESCRIPTION lines; the feed header
///   only carries the X-WR-CALNAME/X-WR-CALDESC pair
/// - Undo the crate's comma escaping in event text: summary parts are
///   joined with a literal `", "`
/// Re-emitting every line also keeps the CRLF terminators bit-exact.
fn clean_ics_output(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());
    let mut in_vevent = false;

    for line in ics.lines() {
        if line == "BEGIN:VEVENT" {
            in_vevent = true;
        } else if line == "END:VEVENT" {
            in_vevent = false;
        }

        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(PRODID);
            result.push_str("\r\n");
            continue;
        }

        // Calendar-level duplicates of the X-WR pair
        if !in_vevent && (line.starts_with("NAME:") || line.starts_with("DESCRIPTION:")) {
            continue;
        }

        if in_vevent && (line.starts_with("SUMMARY:") || line.starts_with("DESCRIPTION:")) {
            result.push_str(&line.replace("\\,", ","));
            result.push_str("\r\n");
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "開始日,終了日,全学年予定,1年個別予定,2,3,4,5,専1,専2";

    fn row(line: &str) -> ScheduleRow {
        let data = format!("{HEADER}\n{line}\n");
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        reader.deserialize::<ScheduleRow>().next().unwrap().unwrap()
    }

    fn render(grade: Grade, lines: &[&str]) -> String {
        let mut document = CalendarDocument::new(grade);
        for line in lines {
            document.add_event(&row(line));
        }
        document.render()
    }

    #[test]
    fn document_carries_fixed_headers() {
        let ics = render(Grade::All, &[]);
        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"), "got:\n{ics}");
        assert!(ics.ends_with("END:VCALENDAR\r\n"), "got:\n{ics}");
        assert!(ics.contains("VERSION:2.0"));
        assert!(ics.contains("CALSCALE:GREGORIAN"));
        assert!(ics.contains("METHOD:PUBLISH"));
        assert!(ics.contains("PRODID:-//jugyobot//q55mehqs//KadaiCalendar//JP"));
        assert!(ics.contains("X-WR-CALNAME:仙台高専 年間行事予定 (全学年)"));
        assert!(ics.contains("X-WR-CALDESC:仙台高専 全学年の年間行事予定"));
        assert!(ics.contains("X-WR-TIMEZONE:Asia/Tokyo"));
    }

    #[test]
    fn grade_label_is_interpolated_into_calendar_name() {
        let ics = render(Grade::Advanced1, &[]);
        assert!(ics.contains("X-WR-CALNAME:仙台高専 年間行事予定 (専1)"));
        assert!(ics.contains("X-WR-CALDESC:仙台高専 専1の年間行事予定"));
    }

    #[test]
    fn every_line_is_crlf_terminated() {
        let ics = render(Grade::All, &["2024-04-10,,入学式,,,,,,,"]);
        assert!(!ics.replace("\r\n", "").contains('\n'));
    }

    #[test]
    fn single_day_event_uses_exclusive_end() {
        let ics = render(Grade::All, &["2024-04-10,,入学式,,,,,,,"]);
        assert!(ics.contains("DTSTART;VALUE=DATE:20240410"), "got:\n{ics}");
        assert!(ics.contains("DTEND;VALUE=DATE:20240411"), "got:\n{ics}");
        assert!(ics.contains("SUMMARY:入学式"));
        assert!(ics.contains("DESCRIPTION:入学式"));
    }

    #[test]
    fn ranged_event_ends_the_day_after_its_last_day() {
        let ics = render(Grade::All, &["2024-07-20,2024-08-25,夏季休業,,,,,,,"]);
        assert!(ics.contains("DTSTART;VALUE=DATE:20240720"));
        assert!(ics.contains("DTEND;VALUE=DATE:20240826"));
    }

    #[test]
    fn all_grades_feed_excludes_grade_only_rows() {
        let ics = render(
            Grade::All,
            &[
                "2024-10-01,,,実力テスト,,,,,,",
                "2024-10-02,,全校集会,,,,,,,",
            ],
        );
        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 1);
        assert!(!ics.contains("実力テスト"));
        assert!(ics.contains("SUMMARY:全校集会"));
    }

    #[test]
    fn grade_feed_includes_shared_text_without_its_own_fragment() {
        let ics = render(Grade::Year1, &["2024-04-10,,入学式,,,,,,,"]);
        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 1);
        assert!(ics.contains("SUMMARY:入学式"));
    }

    #[test]
    fn grade_feed_joins_shared_text_and_labeled_fragment() {
        let ics = render(Grade::Year1, &["2024-10-01,,中間テスト,実力テスト,,,,,,"]);
        // The join is a literal ", ", not the RFC-escaped "\,"
        assert!(ics.contains("SUMMARY:中間テスト, [1年] 実力テスト"), "got:\n{ics}");
        assert!(
            ics.contains("DESCRIPTION:中間テスト, [1年] 実力テスト"),
            "got:\n{ics}"
        );
        assert!(!ics.contains("\\,"), "got:\n{ics}");
    }

    #[test]
    fn header_carries_only_the_x_wr_name_pair() {
        let ics = render(Grade::All, &["2024-04-10,,入学式,,,,,,,"]);
        let header = ics.split("BEGIN:VEVENT").next().unwrap();
        assert!(!header.contains("\r\nNAME:"), "got:\n{header}");
        assert!(!header.contains("\r\nDESCRIPTION:"), "got:\n{header}");
        // The event's own DESCRIPTION is untouched
        assert!(ics.contains("DESCRIPTION:入学式"));
    }

    #[test]
    fn empty_rows_emit_no_event() {
        let ics = render(Grade::Year2, &["2024-10-01,,,実力テスト,,,,,,"]);
        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 0);
    }

    #[test]
    fn vevent_blocks_are_balanced_and_in_row_order() {
        let ics = render(
            Grade::All,
            &[
                "2024-04-10,,入学式,,,,,,,",
                "2024-07-20,2024-08-25,夏季休業,,,,,,,",
            ],
        );
        assert_eq!(
            ics.matches("BEGIN:VEVENT").count(),
            ics.matches("END:VEVENT").count()
        );
        let first = ics.find("20240410").unwrap();
        let second = ics.find("20240720").unwrap();
        assert!(first < second);
    }

    #[test]
    fn event_uids_are_distinct() {
        let ics = render(
            Grade::All,
            &[
                "2024-04-10,,入学式,,,,,,,",
                "2024-04-10,,対面式,,,,,,,",
            ],
        );
        assert!(ics.contains("UID:20240410-g0-0@kadaical"));
        assert!(ics.contains("UID:20240410-g0-1@kadaical"));
    }
}
