//! Weekday × half-day time slots.
//!
//! The scheduling week is a fixed 5×2 grid: Monday through Friday,
//! each split into a morning and an afternoon half-day. Every slot
//! carries the same duration capacity.

use serde::{Deserialize, Serialize};

/// Duration capacity of a single half-day slot, in hours.
///
/// The sum of activity durations placed into one doctor's slot must not
/// exceed this. Carried as a default; builders and analyzers accept an
/// override.
pub const SLOT_CAPACITY_HOURS: f64 = 4.0;

/// A working weekday (weekends are outside the scheduling grid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    /// All weekdays in chronological order.
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
        }
    }
}

/// Half-day partition of a weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HalfDay {
    Morning,
    Afternoon,
}

impl HalfDay {
    /// Both half-days in chronological order.
    pub const ALL: [HalfDay; 2] = [HalfDay::Morning, HalfDay::Afternoon];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            HalfDay::Morning => "morning",
            HalfDay::Afternoon => "afternoon",
        }
    }
}

/// A (weekday, half-day) pair — the atomic scheduling unit of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Day of the working week.
    pub weekday: Weekday,
    /// Morning or afternoon.
    pub half_day: HalfDay,
}

impl TimeSlot {
    /// Creates a new time slot.
    pub fn new(weekday: Weekday, half_day: HalfDay) -> Self {
        Self { weekday, half_day }
    }

    /// Iterates over the full weekly grid in chronological order
    /// (Monday morning, Monday afternoon, Tuesday morning, ...).
    pub fn week() -> impl Iterator<Item = TimeSlot> {
        Weekday::ALL
            .iter()
            .flat_map(|&d| HalfDay::ALL.iter().map(move |&h| TimeSlot::new(d, h)))
    }

    /// Number of slots in the weekly grid.
    pub fn week_len() -> usize {
        Weekday::ALL.len() * HalfDay::ALL.len()
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.weekday.label(), self.half_day.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_week_iteration_order() {
        let slots: Vec<TimeSlot> = TimeSlot::week().collect();
        assert_eq!(slots.len(), 10);
        assert_eq!(slots[0], TimeSlot::new(Weekday::Monday, HalfDay::Morning));
        assert_eq!(slots[1], TimeSlot::new(Weekday::Monday, HalfDay::Afternoon));
        assert_eq!(slots[9], TimeSlot::new(Weekday::Friday, HalfDay::Afternoon));
    }

    #[test]
    fn test_week_len_matches_iteration() {
        assert_eq!(TimeSlot::week().count(), TimeSlot::week_len());
    }

    #[test]
    fn test_slot_ordering_is_chronological() {
        let monday_am = TimeSlot::new(Weekday::Monday, HalfDay::Morning);
        let monday_pm = TimeSlot::new(Weekday::Monday, HalfDay::Afternoon);
        let friday_am = TimeSlot::new(Weekday::Friday, HalfDay::Morning);
        assert!(monday_am < monday_pm);
        assert!(monday_pm < friday_am);
    }

    #[test]
    fn test_display() {
        let slot = TimeSlot::new(Weekday::Wednesday, HalfDay::Afternoon);
        assert_eq!(slot.to_string(), "Wednesday afternoon");
    }
}
