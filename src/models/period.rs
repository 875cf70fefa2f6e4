//! Vacation intervals and rotation periods.
//!
//! A rotation period is a contiguous date range between two vacation
//! boundaries (or the school-year start/end). Periods are computed once
//! per invocation, are immutable, and together tile the school year with
//! no gaps or overlaps.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// A named school-holiday interval, with raw date strings as consumed
/// from the external vacation calendar.
///
/// Dates are ISO `YYYY-MM-DD` strings; locale normalization of source
/// calendars happens upstream. Parsing occurs in the boundary calculator
/// and malformed strings surface as a parse error there.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vacation {
    /// Vacation name (e.g. "Toussaint", "Noël").
    pub name: String,
    /// First day of the vacation, inclusive.
    pub start: String,
    /// Last day of the vacation, inclusive.
    pub end: String,
}

impl Vacation {
    /// Creates a vacation interval.
    pub fn new(
        name: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            start: start.into(),
            end: end.into(),
        }
    }
}

/// A contiguous span of weeks between two vacation boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotationPeriod {
    /// Human-readable name.
    pub name: String,
    /// First day, inclusive.
    pub start_date: NaiveDate,
    /// Last day, inclusive.
    pub end_date: NaiveDate,
    /// ISO week number of the first day.
    pub start_week: u32,
    /// ISO week number of the last day.
    pub end_week: u32,
    /// Calendar year of the first day.
    pub year: i32,
    /// Name of the vacation this period precedes (or "End of Year").
    pub vacation: String,
    /// Duration in whole weeks (ceiling of inclusive days ÷ 7).
    pub weeks: u32,
}

impl RotationPeriod {
    /// Creates a period, deriving week numbers and duration from its dates.
    pub fn new(
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        vacation: impl Into<String>,
    ) -> Self {
        let days = (end_date - start_date).num_days() + 1;
        let weeks = ((days + 6) / 7) as u32;
        Self {
            name: name.into(),
            start_date,
            end_date,
            start_week: start_date.iso_week().week(),
            end_week: end_date.iso_week().week(),
            year: start_date.year(),
            vacation: vacation.into(),
            weeks,
        }
    }

    /// Whether a calendar date falls inside this period.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Whether any day of the given ISO week falls inside this period.
    ///
    /// Handles periods straddling a calendar-year boundary: a period
    /// ending in week 52 of one year can contain week 1 of the next,
    /// because membership is decided by date overlap rather than by week
    /// number comparison.
    pub fn contains_week(&self, iso_year: i32, week: u32) -> bool {
        let Some(monday) = NaiveDate::from_isoywd_opt(iso_year, week, chrono::Weekday::Mon)
        else {
            return false;
        };
        let Some(sunday) = monday.checked_add_days(Days::new(6)) else {
            return false;
        };
        monday <= self.end_date && sunday >= self.start_date
    }
}
