//! Calendar month used as the grouping key for monthly summaries

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar month, displayed as `YYYY-MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Month {
    pub year: i32,
    pub month: u32,
}

impl Month {
    /// The month a date falls in
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{:04}-{:02}", self.year, self.month))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_of_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(Month::of(date), Month { year: 2024, month: 3 });
    }

    #[test]
    fn test_display() {
        assert_eq!(Month { year: 2024, month: 3 }.to_string(), "2024-03");
        assert_eq!(Month { year: 987, month: 12 }.to_string(), "0987-12");
        assert_eq!(format!("{:>9}", Month { year: 2024, month: 3 }), "  2024-03");
    }
}
