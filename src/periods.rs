//! Rotation boundary calculator.
//!
//! Derives the consecutive rotation periods of a school year from a
//! calendar of vacation intervals: one period preceding each vacation
//! (ending the day before the vacation starts) and one trailing period
//! after the last vacation, ending at the school-year end date.
//!
//! The computation is a pure function of its inputs. Vacations are sorted
//! by start date before the fold so the result never depends on input
//! iteration order.

use chrono::{Days, NaiveDate};

use crate::error::{EngineResult, ScheduleError};
use crate::models::{RotationPeriod, Vacation};

/// Name given to the trailing period after the last vacation.
pub const END_OF_YEAR: &str = "End of Year";

/// Parses an ISO `YYYY-MM-DD` date string.
///
/// Surrounding whitespace is tolerated; anything else fails with a
/// [`ScheduleError::DateParse`] carrying the offending input.
pub fn parse_date(raw: &str) -> EngineResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|source| {
        ScheduleError::DateParse {
            raw: raw.to_string(),
            source,
        }
    })
}

/// Computes the rotation periods tiling one school year.
///
/// # Algorithm
/// A cursor starts at `year_start`. For each vacation in chronological
/// order, a period `[cursor, vacation start − 1]` is emitted, tagged with
/// the vacation's name, and the cursor advances to the day after the
/// vacation ends. A final period `[cursor, year_end]` named "End of Year"
/// closes the year.
///
/// Back-to-back vacations produce no empty period between them.
///
/// # Errors
/// Fails on malformed vacation date strings and on vacation intervals
/// that end before they start.
pub fn compute_rotation_periods(
    vacations: &[Vacation],
    year_start: NaiveDate,
    year_end: NaiveDate,
) -> EngineResult<Vec<RotationPeriod>> {
    if year_end < year_start {
        return Err(ScheduleError::InvalidDateRange(format!(
            "school year ends {year_end} before it starts {year_start}"
        )));
    }

    let mut intervals = Vec::with_capacity(vacations.len());
    for vacation in vacations {
        let start = parse_date(&vacation.start)?;
        let end = parse_date(&vacation.end)?;
        if end < start {
            return Err(ScheduleError::InvalidDateRange(format!(
                "vacation '{}' ends {end} before it starts {start}",
                vacation.name
            )));
        }
        intervals.push((start, end, vacation.name.as_str()));
    }
    intervals.sort_by_key(|&(start, ..)| start);

    let mut periods = Vec::with_capacity(intervals.len() + 1);
    let mut cursor = year_start;

    for (vacation_start, vacation_end, name) in intervals {
        let Some(period_end) = vacation_start.checked_sub_days(Days::new(1)) else {
            return Err(ScheduleError::InvalidDateRange(format!(
                "vacation '{name}' starts at the edge of the calendar"
            )));
        };
        if period_end >= cursor {
            periods.push(RotationPeriod::new(name, cursor, period_end, name));
        }
        let Some(next) = vacation_end.checked_add_days(Days::new(1)) else {
            return Err(ScheduleError::InvalidDateRange(format!(
                "vacation '{name}' ends at the edge of the calendar"
            )));
        };
        cursor = cursor.max(next);
    }

    if cursor <= year_end {
        periods.push(RotationPeriod::new(END_OF_YEAR, cursor, year_end, END_OF_YEAR));
    }

    Ok(periods)
}

/// Finds the period containing any day of the given ISO week.
pub fn find_period(
    periods: &[RotationPeriod],
    iso_year: i32,
    week: u32,
) -> Option<&RotationPeriod> {
    periods.iter().find(|p| p.contains_week(iso_year, week))
}
