//! ICS document handling.

pub mod generate;

pub use generate::CalendarDocument;
