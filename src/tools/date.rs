use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Format accepted from `<input type="date">` and the RPC API.
pub const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateDifference {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Signed; negative when `end` precedes `start`.
    pub days: i64,
}

impl DateDifference {
    pub fn day_label(&self) -> &'static str {
        if self.days == 1 {
            "day"
        } else {
            "days"
        }
    }
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), INPUT_DATE_FORMAT).ok()
}

/// Whole days between two calendar dates. Date-only values are always whole
/// days apart, so the ceiling of the quotient is the plain difference.
pub fn date_difference(start: NaiveDate, end: NaiveDate) -> DateDifference {
    DateDifference {
        start,
        end,
        days: end.signed_duration_since(start).num_days(),
    }
}

/// "Monday, January 1, 2024"
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}
