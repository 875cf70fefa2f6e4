//! Weekly grids, assignment outcomes, and rule violations.
//!
//! A `WeekGrid` maps each weekday × half-day slot to a list of activity
//! codes. The same shape serves three roles: a doctor's fixed backbone
//! commitments, the required-activity matrix for a representative week,
//! and a built per-doctor weekly schedule.
//!
//! An `AssignmentOutcome` is what either assignment engine produces for
//! one rotation period or timeframe: unit → owner mappings, per-doctor
//! workloads, unassigned units, and any soft-constraint violations.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::{ActivityCatalog, HalfDay, TimeSlot, Weekday};

/// A weekday × half-day grid of activity-code lists.
///
/// Slots are stored in nested ordered maps so iteration order is always
/// chronological, independent of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeekGrid {
    slots: BTreeMap<Weekday, BTreeMap<HalfDay, Vec<String>>>,
}

impl WeekGrid {
    /// Creates an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an activity code to a slot (builder form).
    pub fn with_entry(mut self, slot: TimeSlot, code: impl Into<String>) -> Self {
        self.add(slot, code);
        self
    }

    /// Appends an activity code to a slot.
    pub fn add(&mut self, slot: TimeSlot, code: impl Into<String>) {
        self.slots
            .entry(slot.weekday)
            .or_default()
            .entry(slot.half_day)
            .or_default()
            .push(code.into());
    }

    /// Activity codes in a slot (empty slice when the slot is empty).
    pub fn activities_at(&self, slot: TimeSlot) -> &[String] {
        self.slots
            .get(&slot.weekday)
            .and_then(|day| day.get(&slot.half_day))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether a slot already contains the given activity code.
    pub fn contains(&self, slot: TimeSlot, code: &str) -> bool {
        self.activities_at(slot).iter().any(|c| c == code)
    }

    /// Sum of activity durations placed into a slot, in hours.
    pub fn hours_at(&self, slot: TimeSlot, catalog: &ActivityCatalog) -> f64 {
        self.activities_at(slot)
            .iter()
            .map(|c| catalog.duration_hours(c))
            .sum()
    }

    /// The distinct activity codes appearing anywhere in the grid.
    pub fn all_codes(&self) -> BTreeSet<String> {
        TimeSlot::week()
            .flat_map(|slot| self.activities_at(slot).iter().cloned())
            .collect()
    }

    /// Whether no slot holds any activity.
    pub fn is_empty(&self) -> bool {
        TimeSlot::week().all(|slot| self.activities_at(slot).is_empty())
    }
}

/// One doctor's expanded weekly schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklySchedule {
    /// Doctor code.
    pub doctor: String,
    /// The populated weekly grid (backbone plus overlaid activities).
    pub grid: WeekGrid,
}

impl WeeklySchedule {
    /// Creates a schedule for a doctor from a grid.
    pub fn new(doctor: impl Into<String>, grid: WeekGrid) -> Self {
        Self {
            doctor: doctor.into(),
            grid,
        }
    }
}

/// Result of one engine run over a rotation period or timeframe.
///
/// Units are activity codes for the strict engine and rotation labels
/// for the simplified engine; both map each unit to exactly one doctor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssignmentOutcome {
    /// Unit → owning doctor code.
    pub assignments: BTreeMap<String, String>,
    /// Doctor code → owned units, in assignment order.
    pub by_doctor: BTreeMap<String, Vec<String>>,
    /// Doctor code → accumulated duration-hours this period.
    pub workload_hours: BTreeMap<String, f64>,
    /// Units with no qualified doctor, left for the validator to surface.
    pub unassigned: Vec<String>,
    /// Soft-constraint violations recorded during assignment.
    pub violations: Vec<RuleViolation>,
}

impl AssignmentOutcome {
    /// Creates an empty outcome.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a unit → doctor assignment and accumulates its workload.
    pub fn record(&mut self, unit: impl Into<String>, doctor: impl Into<String>, hours: f64) {
        let unit = unit.into();
        let doctor = doctor.into();
        self.assignments.insert(unit.clone(), doctor.clone());
        self.by_doctor.entry(doctor.clone()).or_default().push(unit);
        *self.workload_hours.entry(doctor).or_insert(0.0) += hours;
    }

    /// The doctor owning a unit, if any.
    pub fn owner_of(&self, unit: &str) -> Option<&str> {
        self.assignments.get(unit).map(String::as_str)
    }

    /// Number of assigned units.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }
}

/// A detected rule violation.
///
/// Violations never block assignment; they are reported as data for the
/// caller to act on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleViolation {
    /// Type of violation.
    pub kind: ViolationKind,
    /// Related entity code (doctor or activity).
    pub entity: String,
    /// Human-readable description.
    pub message: String,
}

/// Classification of rule violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationKind {
    /// A doctor's slot exceeds its duration capacity.
    SlotOverload,
    /// An assigned activity's grouping root is absent from the assignee's
    /// capability list.
    MissingCapability,
    /// More than one doctor recorded as owner of an activity within one
    /// rotation period.
    SharedOwnership,
    /// A doctor holds more than one rotation in a single timeframe.
    DoubleRotation,
}

impl RuleViolation {
    /// Creates a slot-overload violation.
    pub fn slot_overload(doctor: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: ViolationKind::SlotOverload,
            entity: doctor.into(),
            message: message.into(),
        }
    }

    /// Creates a missing-capability violation.
    pub fn missing_capability(doctor: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: ViolationKind::MissingCapability,
            entity: doctor.into(),
            message: message.into(),
        }
    }

    /// Creates a shared-ownership violation.
    pub fn shared_ownership(activity: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: ViolationKind::SharedOwnership,
            entity: activity.into(),
            message: message.into(),
        }
    }

    /// Creates a double-rotation violation.
    pub fn double_rotation(doctor: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: ViolationKind::DoubleRotation,
            entity: doctor.into(),
            message: message.into(),
        }
    }
}
