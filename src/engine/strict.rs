//! Exclusive assignment engine.
//!
//! Assigns every required activity to exactly one doctor for a full
//! rotation period. Grouped activities (a root and its sub-activities)
//! always land on the same owner.
//!
//! # Algorithm
//!
//! 1. Union the required-activity lists over all weekday × half-day
//!    slots to obtain the activity set for a representative week.
//! 2. Order it: grouping-family activities first, then by descending
//!    duration, ties broken by code.
//! 3. For each activity, pick an owner by round robin over its qualified
//!    doctors, starting at `(offset + activity index) mod qualified
//!    count`, accepting the first candidate under the per-period capacity
//!    ceiling; if none fits, fall back to the first qualified doctor
//!    (capacity is advisory, not a hard block).
//! 4. Propagate ownership to unassigned grouping siblings immediately,
//!    then advance the offset by one modulo this activity's qualified
//!    count.
//!
//! Activities with no qualified doctor are skipped with a logged note
//! and surface downstream as coverage gaps.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::{AssignmentContext, AssignmentStrategy};
use crate::models::AssignmentOutcome;
use crate::qualification::QualificationIndex;

/// Default per-doctor workload ceiling for one period, in duration-hours.
const DEFAULT_PERIOD_CAPACITY_HOURS: f64 = 20.0;

/// Exclusive per-period activity assignment.
///
/// # Example
///
/// ```
/// use rotaplan::engine::{AssignmentContext, AssignmentStrategy, StrictEngine};
/// use rotaplan::models::{ActivityCatalog, Doctor, HalfDay, RotationPeriod, TimeSlot, WeekGrid, Weekday};
/// use chrono::NaiveDate;
///
/// let doctors = vec![Doctor::new("YC").with_capability("HDJ")];
/// let catalog = ActivityCatalog::new().with_activity("HDJ", 4.0);
/// let expected = WeekGrid::new()
///     .with_entry(TimeSlot::new(Weekday::Monday, HalfDay::Morning), "HDJ");
/// let period = RotationPeriod::new(
///     "P1",
///     NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 10, 18).unwrap(),
///     "Toussaint",
/// );
///
/// let ctx = AssignmentContext::new(&doctors, &catalog, &expected, &period);
/// let outcome = StrictEngine::new().assign(&ctx, 0);
/// assert_eq!(outcome.owner_of("HDJ"), Some("YC"));
/// ```
#[derive(Debug, Clone)]
pub struct StrictEngine {
    period_capacity_hours: f64,
}

impl StrictEngine {
    /// Creates an engine with the default 20-hour period capacity.
    pub fn new() -> Self {
        Self {
            period_capacity_hours: DEFAULT_PERIOD_CAPACITY_HOURS,
        }
    }

    /// Overrides the per-doctor period capacity ceiling.
    pub fn with_period_capacity(mut self, hours: f64) -> Self {
        self.period_capacity_hours = hours;
        self
    }

    /// The required activities of a representative week, in assignment
    /// priority order.
    fn ordered_activities(&self, ctx: &AssignmentContext<'_>) -> Vec<String> {
        let required = ctx.expected.all_codes();

        let mut family_size: BTreeMap<&str, usize> = BTreeMap::new();
        for code in &required {
            *family_size
                .entry(ctx.catalog.grouping_root(code))
                .or_insert(0) += 1;
        }

        let mut ordered: Vec<String> = required.iter().cloned().collect();
        ordered.sort_by(|a, b| {
            let grouped_a = family_size[ctx.catalog.grouping_root(a)] > 1;
            let grouped_b = family_size[ctx.catalog.grouping_root(b)] > 1;
            // Grouped families first, then longer activities, then by code
            grouped_b
                .cmp(&grouped_a)
                .then_with(|| {
                    ctx.catalog
                        .duration_hours(b)
                        .partial_cmp(&ctx.catalog.duration_hours(a))
                        .unwrap_or(Ordering::Equal)
                })
                .then_with(|| a.cmp(b))
        });
        ordered
    }
}

impl AssignmentStrategy for StrictEngine {
    fn name(&self) -> &'static str {
        "strict"
    }

    fn assign(&self, ctx: &AssignmentContext<'_>, offset: usize) -> AssignmentOutcome {
        let index = QualificationIndex::build(ctx.doctors);
        let ordered = self.ordered_activities(ctx);
        let required = ctx.expected.all_codes();

        let mut outcome = AssignmentOutcome::new();
        let mut offset = offset;

        for (activity_index, code) in ordered.iter().enumerate() {
            if outcome.assignments.contains_key(code) {
                // Already owned through grouping propagation
                continue;
            }

            let qualified = index.qualified_for(ctx.catalog, code);
            if qualified.is_empty() {
                warn!(
                    activity = %code,
                    period = %ctx.period.name,
                    "no qualified doctor, leaving coverage gap"
                );
                outcome.unassigned.push(code.clone());
                continue;
            }

            let count = qualified.len();
            let start = (offset + activity_index) % count;
            let duration = ctx.catalog.duration_hours(code);

            let mut chosen: Option<&str> = None;
            for step in 0..count {
                let candidate = qualified[(start + step) % count].as_str();
                let load = outcome
                    .workload_hours
                    .get(candidate)
                    .copied()
                    .unwrap_or(0.0);
                if load + duration <= self.period_capacity_hours {
                    chosen = Some(candidate);
                    break;
                }
            }

            let owner = match chosen {
                Some(candidate) => candidate.to_string(),
                None => {
                    debug!(
                        activity = %code,
                        period = %ctx.period.name,
                        "every qualified doctor is at capacity, falling back to first qualified"
                    );
                    qualified[0].clone()
                }
            };

            outcome.record(code.clone(), owner.clone(), duration);

            // Siblings in the same grouping family follow the owner
            for sibling in ctx.catalog.family(code) {
                if sibling.as_str() != code.as_str()
                    && required.contains(&sibling)
                    && !outcome.assignments.contains_key(&sibling)
                {
                    let sibling_hours = ctx.catalog.duration_hours(&sibling);
                    outcome.record(sibling, owner.clone(), sibling_hours);
                }
            }

            offset = (offset + 1) % count;
        }

        outcome
    }
}

impl Default for StrictEngine {
    fn default() -> Self {
        Self::new()
    }
}
