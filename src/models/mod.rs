//! Rotation scheduling domain models.
//!
//! Core data types for the rotation engine: the weekly slot grid, the
//! activity catalog with grouping families, the doctor roster, vacation
//! intervals and rotation periods, and the assignment/violation output
//! types shared by both engines.

mod activity;
mod doctor;
mod period;
mod schedule;
mod timeslot;

pub use activity::ActivityCatalog;
pub use doctor::Doctor;
pub use period::{RotationPeriod, Vacation};
pub use schedule::{AssignmentOutcome, RuleViolation, ViolationKind, WeekGrid, WeeklySchedule};
pub use timeslot::{HalfDay, TimeSlot, Weekday, SLOT_CAPACITY_HOURS};
