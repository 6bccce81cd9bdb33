//! Calendar month used to bucket events.

use serde::Serialize;
use std::fmt;

/// One of the twelve months of the epoch year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Month {
    Jan = 1,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    /// All months in calendar order.
    pub const ALL: [Month; 12] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
        Month::Jul,
        Month::Aug,
        Month::Sep,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    /// Returns the month for a 1-based number, or `None` outside 1..=12.
    pub fn from_number(number: u32) -> Option<Self> {
        let idx = usize::try_from(number).ok()?.checked_sub(1)?;
        Self::ALL.get(idx).copied()
    }

    /// 1-based month number.
    pub fn number(self) -> u32 {
        self as u32
    }

    /// 0-based position, for indexing per-month arrays.
    pub fn index(self) -> usize {
        self as usize - 1
    }

    /// Three-letter uppercase label used in reports and chart axes.
    pub fn label(self) -> &'static str {
        match self {
            Month::Jan => "JAN",
            Month::Feb => "FEB",
            Month::Mar => "MAR",
            Month::Apr => "APR",
            Month::May => "MAY",
            Month::Jun => "JUN",
            Month::Jul => "JUL",
            Month::Aug => "AUG",
            Month::Sep => "SEP",
            Month::Oct => "OCT",
            Month::Nov => "NOV",
            Month::Dec => "DEC",
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
