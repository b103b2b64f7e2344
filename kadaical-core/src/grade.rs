//! Grade identifiers and their display labels.
//!
//! A feed is requested for one grade. Grade 0 is the aggregate "all
//! grades" view; 1-5 are the regular year levels and 6/7 are the two
//! advanced-course tracks (専攻科).

use std::fmt;

use serde::{Deserialize, Serialize};

/// A year level or track a calendar feed can be generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    /// Aggregate view across every grade
    All,
    Year1,
    Year2,
    Year3,
    Year4,
    Year5,
    /// First year of the advanced course (専1)
    Advanced1,
    /// Second year of the advanced course (専2)
    Advanced2,
}

/// The per-grade members, in CSV column order. `Grade::All` has no
/// column of its own and is deliberately absent.
pub const PER_GRADE: [Grade; 7] = [
    Grade::Year1,
    Grade::Year2,
    Grade::Year3,
    Grade::Year4,
    Grade::Year5,
    Grade::Advanced1,
    Grade::Advanced2,
];

impl Grade {
    /// Human-readable label used in calendar names and summary fragments.
    pub fn label(self) -> &'static str {
        match self {
            Grade::All => "全学年",
            Grade::Year1 => "1年",
            Grade::Year2 => "2年",
            Grade::Year3 => "3年",
            Grade::Year4 => "4年",
            Grade::Year5 => "5年",
            Grade::Advanced1 => "専1",
            Grade::Advanced2 => "専2",
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Grade::All => 0,
            Grade::Year1 => 1,
            Grade::Year2 => 2,
            Grade::Year3 => 3,
            Grade::Year4 => 4,
            Grade::Year5 => 5,
            Grade::Advanced1 => 6,
            Grade::Advanced2 => 7,
        }
    }

    pub fn from_number(n: u8) -> Option<Grade> {
        match n {
            0 => Some(Grade::All),
            1 => Some(Grade::Year1),
            2 => Some(Grade::Year2),
            3 => Some(Grade::Year3),
            4 => Some(Grade::Year4),
            5 => Some(Grade::Year5),
            6 => Some(Grade::Advanced1),
            7 => Some(Grade::Advanced2),
            _ => None,
        }
    }

    /// Resolve a query parameter into a grade.
    ///
    /// An absent, non-numeric, or out-of-range value is not an error:
    /// the feed falls back to the all-grades view.
    pub fn from_param(param: Option<&str>) -> Grade {
        param
            .filter(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|s| s.parse::<u8>().ok())
            .and_then(Grade::from_number)
            .unwrap_or(Grade::All)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
