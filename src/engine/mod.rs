//! Assignment engines and the school-year driver.
//!
//! Two alternative strategies sit behind one seam:
//!
//! - [`StrictEngine`] assigns every required activity to exactly one
//!   doctor for an entire rotation period (exclusive ownership).
//! - [`RoundRobinEngine`] operates at the coarser rotation/skill level,
//!   one rotation per doctor per timeframe.
//!
//! Neither supersedes the other; callers pick one explicitly. The driver
//! [`plan_school_year`] folds the fairness offset across periods so that
//! who is "first in line" shifts from one period to the next.
//!
//! # References
//! - Ernst et al. (2004), "Staff scheduling and rostering: A review of
//!   applications, methods and models"

mod round_robin;
mod strict;

pub use round_robin::RoundRobinEngine;
pub use strict::StrictEngine;

use std::collections::BTreeMap;
use std::fmt::Debug;

use crate::builder::ScheduleBuilder;
use crate::error::{EngineResult, ScheduleError};
use crate::models::{
    ActivityCatalog, AssignmentOutcome, Doctor, RotationPeriod, WeekGrid, WeeklySchedule,
};

/// Static inputs shared by both engines for one period.
///
/// The expected-activity matrix is an explicit parameter, never ambient
/// state, so an engine run is a pure function of its context and offset.
#[derive(Debug, Clone, Copy)]
pub struct AssignmentContext<'a> {
    /// Participating doctors, in roster order.
    pub doctors: &'a [Doctor],
    /// Activity durations and grouping rules.
    pub catalog: &'a ActivityCatalog,
    /// Required activities per weekday × half-day for a representative week.
    pub expected: &'a WeekGrid,
    /// The rotation period being assigned.
    pub period: &'a RotationPeriod,
}

impl<'a> AssignmentContext<'a> {
    /// Creates a context for one period.
    pub fn new(
        doctors: &'a [Doctor],
        catalog: &'a ActivityCatalog,
        expected: &'a WeekGrid,
        period: &'a RotationPeriod,
    ) -> Self {
        Self {
            doctors,
            catalog,
            expected,
            period,
        }
    }
}

/// An assignment strategy for one rotation period or timeframe.
///
/// Implementations never fail outright: unsatisfiable constraints degrade
/// to fallbacks, and gaps or violations are reported in the outcome for
/// the validator to surface.
pub trait AssignmentStrategy: Debug {
    /// Strategy name (e.g. "strict", "round-robin").
    fn name(&self) -> &'static str;

    /// Assigns one period. `offset` is the fairness offset carried in
    /// from earlier periods.
    fn assign(&self, ctx: &AssignmentContext<'_>, offset: usize) -> AssignmentOutcome;
}

/// Assignment and expanded schedules for one rotation period.
#[derive(Debug, Clone)]
pub struct PeriodPlan {
    /// The period this plan covers.
    pub period: RotationPeriod,
    /// The engine's assignment outcome.
    pub outcome: AssignmentOutcome,
    /// Doctor code → expanded weekly schedule.
    pub schedules: BTreeMap<String, WeeklySchedule>,
}

/// Runs a strategy over consecutive rotation periods and expands each
/// outcome into weekly schedules.
///
/// The fairness offset advances by one per period, modulo the doctor
/// count, so the round-robin starting point rotates across the year.
/// Periods are processed strictly in order because each offset depends on
/// how many periods preceded it.
///
/// `max_periods` caps the number of periods processed, purely to bound
/// output size.
///
/// # Errors
/// Fails with [`ScheduleError::EmptyRoster`] when the roster is empty.
pub fn plan_school_year(
    strategy: &dyn AssignmentStrategy,
    doctors: &[Doctor],
    catalog: &ActivityCatalog,
    expected: &WeekGrid,
    periods: &[RotationPeriod],
    max_periods: Option<usize>,
) -> EngineResult<Vec<PeriodPlan>> {
    if doctors.is_empty() {
        return Err(ScheduleError::EmptyRoster);
    }

    let limit = max_periods.unwrap_or(periods.len());
    let builder = ScheduleBuilder::new();
    let mut plans = Vec::with_capacity(periods.len().min(limit));

    for (index, period) in periods.iter().take(limit).enumerate() {
        let offset = index % doctors.len();
        let ctx = AssignmentContext::new(doctors, catalog, expected, period);
        let outcome = strategy.assign(&ctx, offset);
        let schedules = builder.build(doctors, catalog, expected, &outcome.assignments);
        plans.push(PeriodPlan {
            period: period.clone(),
            outcome,
            schedules,
        });
    }

    Ok(plans)
}
