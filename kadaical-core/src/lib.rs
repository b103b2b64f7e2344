//! Core types for the kadaical ecosystem.
//!
//! This crate turns yearly CSV schedule files into per-grade iCalendar
//! feeds:
//! - `schedule` for the typed CSV rows and academic-year resolution
//! - `summary` for the per-grade event text
//! - `ics` for the VCALENDAR document
//! - `feed` for the read-then-render pipeline the binaries drive

pub mod config;
pub mod error;
pub mod feed;
pub mod grade;
pub mod ics;
pub mod schedule;
pub mod summary;

pub use config::FeedConfig;
pub use error::{FeedError, FeedResult};
pub use feed::generate_feed;
pub use grade::Grade;
pub use ics::CalendarDocument;
pub use schedule::{AcademicYear, ScheduleRow, load_rows};
pub use summary::build_summary;
