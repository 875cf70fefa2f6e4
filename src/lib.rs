//! Rotation assignment and validation engine for medical staff.
//!
//! Assigns doctors to recurring weekly clinical activities across
//! successive rotation periods bounded by school-holiday vacations,
//! honoring per-doctor capability lists, fixed backbone commitments,
//! and per-slot duration capacity — then validates the result for
//! coverage gaps, duplicate assignments, and rule violations.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Doctor`, `ActivityCatalog`, `TimeSlot`,
//!   `RotationPeriod`, `WeekGrid`, `AssignmentOutcome`, `RuleViolation`
//! - **`periods`**: Rotation boundary calculator over vacation calendars
//! - **`qualification`**: Activity → qualified-doctor index and coverage
//!   gap analysis
//! - **`engine`**: The two assignment strategies (exclusive per-activity
//!   ownership, simplified per-rotation round robin) and the school-year
//!   driver
//! - **`builder`**: Expansion of ownership into per-doctor weekly grids
//! - **`validation`**: Integrity checks on the static reference data
//! - **`analysis`**: Coverage, exclusivity, and compliance reporting
//!
//! # Architecture
//!
//! Everything is a pure, single-threaded transformation of in-memory
//! reference data: no I/O, no hidden state, no solver. Periods are
//! processed sequentially because each one's fairness offset depends on
//! the periods before it. Unsatisfiable constraints never abort a run —
//! the engines degrade to fallbacks and the analyzers report the gaps.
//!
//! # References
//!
//! - Ernst et al. (2004), "Staff scheduling and rostering: A review of
//!   applications, methods and models"
//! - Burke et al. (2004), "The State of the Art of Nurse Rostering"

pub mod analysis;
pub mod builder;
pub mod engine;
pub mod error;
pub mod models;
pub mod periods;
pub mod qualification;
pub mod validation;
