//! Simplified round-robin engine.
//!
//! Operates at the rotation/skill level rather than the activity level:
//! each distinct capability code is a rotation bucket, and every bucket
//! gets exactly one doctor per timeframe. Scarce rotations (fewest
//! qualified doctors) are filled first.
//!
//! One rotation per doctor per timeframe is a soft constraint: when every
//! qualified doctor already holds a rotation, the one with the fewest
//! assignments takes a second, and the violation is recorded rather than
//! blocked.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use super::{AssignmentContext, AssignmentStrategy};
use crate::models::{AssignmentOutcome, RuleViolation};
use crate::qualification::QualificationIndex;

/// Coarse-grained rotation assignment.
#[derive(Debug, Clone, Default)]
pub struct RoundRobinEngine;

impl RoundRobinEngine {
    /// Creates the engine.
    pub fn new() -> Self {
        Self
    }
}

impl AssignmentStrategy for RoundRobinEngine {
    fn name(&self) -> &'static str {
        "round-robin"
    }

    fn assign(&self, ctx: &AssignmentContext<'_>, offset: usize) -> AssignmentOutcome {
        let index = QualificationIndex::build(ctx.doctors);

        // Scarcest rotation first, ties by code
        let mut rotations: Vec<(&str, &[String])> = index.buckets().collect();
        rotations.sort_by(|a, b| a.1.len().cmp(&b.1.len()).then_with(|| a.0.cmp(b.0)));

        let mut outcome = AssignmentOutcome::new();
        let mut holding: BTreeSet<String> = BTreeSet::new();
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();

        for (rotation_index, (rotation, qualified)) in rotations.iter().enumerate() {
            let free: Vec<&String> = qualified
                .iter()
                .filter(|d| !holding.contains(d.as_str()))
                .collect();

            let owner: String = if !free.is_empty() {
                free[(offset + rotation_index) % free.len()].to_string()
            } else {
                // Everyone qualified already holds a rotation this
                // timeframe: take the least-loaded, deterministically.
                let mut best = &qualified[0];
                for candidate in qualified.iter().skip(1) {
                    let candidate_count = counts.get(candidate.as_str()).copied().unwrap_or(0);
                    let best_count = counts.get(best.as_str()).copied().unwrap_or(0);
                    if candidate_count < best_count
                        || (candidate_count == best_count && candidate < best)
                    {
                        best = candidate;
                    }
                }
                debug!(
                    rotation = %rotation,
                    doctor = %best,
                    timeframe = %ctx.period.name,
                    "all qualified doctors already assigned, doubling up"
                );
                outcome.violations.push(RuleViolation::double_rotation(
                    best.as_str(),
                    format!(
                        "doctor '{best}' takes rotation '{rotation}' as a second assignment in timeframe '{}'",
                        ctx.period.name
                    ),
                ));
                best.to_string()
            };

            outcome.record(
                rotation.to_string(),
                owner.clone(),
                ctx.catalog.duration_hours(rotation),
            );
            holding.insert(owner.clone());
            *counts.entry(owner).or_insert(0) += 1;
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityCatalog, Doctor, RotationPeriod, WeekGrid, ViolationKind};
    use chrono::NaiveDate;

    fn sample_period(name: &str) -> RotationPeriod {
        RotationPeriod::new(
            name,
            NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 10, 18).unwrap(),
            "Toussaint",
        )
    }

    fn assign(doctors: &[Doctor], offset: usize) -> AssignmentOutcome {
        let catalog = ActivityCatalog::new();
        let expected = WeekGrid::new();
        let period = sample_period("T1");
        let ctx = AssignmentContext::new(doctors, &catalog, &expected, &period);
        RoundRobinEngine::new().assign(&ctx, offset)
    }

    #[test]
    fn test_scarce_rotation_filled_first() {
        // Only AL can do EMIT; with one rotation per doctor, AL must not
        // be consumed by a broader rotation before EMIT is filled.
        let doctors = vec![
            Doctor::new("YC").with_capabilities(["HDJ", "HTC1"]),
            Doctor::new("MB").with_capabilities(["HDJ", "HTC1"]),
            Doctor::new("AL").with_capabilities(["HDJ", "EMIT"]),
        ];
        let outcome = assign(&doctors, 0);

        assert_eq!(outcome.owner_of("EMIT"), Some("AL"));
        assert!(outcome.violations.is_empty());
        // Every doctor holds exactly one of the three rotations
        assert_eq!(outcome.assignment_count(), 3);
        for units in outcome.by_doctor.values() {
            assert_eq!(units.len(), 1);
        }
    }

    #[test]
    fn test_one_rotation_per_doctor_is_soft() {
        // Two doctors, three rotations: someone has to double up, and the
        // violation is recorded instead of blocking.
        let doctors = vec![
            Doctor::new("YC").with_capabilities(["HDJ", "HTC1", "EMIT"]),
            Doctor::new("MB").with_capabilities(["HDJ", "HTC1", "EMIT"]),
        ];
        let outcome = assign(&doctors, 0);

        assert_eq!(outcome.assignment_count(), 3);
        assert_eq!(outcome.violations.len(), 1);
        assert_eq!(outcome.violations[0].kind, ViolationKind::DoubleRotation);
    }

    #[test]
    fn test_fallback_picks_fewest_assignments() {
        // One doctor qualified for everything, another for one rotation:
        // the double-up goes to whoever holds the fewest so far.
        let doctors = vec![
            Doctor::new("YC").with_capabilities(["HDJ", "HTC1", "EMIT"]),
            Doctor::new("MB").with_capabilities(["HDJ"]),
        ];
        let outcome = assign(&doctors, 0);

        assert_eq!(outcome.assignment_count(), 3);
        // YC is forced onto both single-doctor rotations, MB keeps HDJ
        assert_eq!(outcome.owner_of("EMIT"), Some("YC"));
        assert_eq!(outcome.owner_of("HTC1"), Some("YC"));
        assert_eq!(outcome.owner_of("HDJ"), Some("MB"));
    }

    #[test]
    fn test_offset_shifts_between_timeframes() {
        let doctors = vec![
            Doctor::new("YC").with_capability("HDJ"),
            Doctor::new("MB").with_capability("HDJ"),
        ];
        let first = assign(&doctors, 0);
        let second = assign(&doctors, 1);

        assert_ne!(first.owner_of("HDJ"), second.owner_of("HDJ"));
    }

    #[test]
    fn test_deterministic() {
        let doctors = vec![
            Doctor::new("YC").with_capabilities(["HDJ", "HTC1"]),
            Doctor::new("MB").with_capabilities(["HDJ", "EMIT"]),
            Doctor::new("AL").with_capabilities(["HTC1", "EMIT"]),
        ];
        let a = assign(&doctors, 2);
        let b = assign(&doctors, 2);
        assert_eq!(a.assignments, b.assignments);
    }

    #[test]
    fn test_rotation_workload_uses_catalog_durations() {
        let doctors = vec![Doctor::new("YC").with_capability("HDJ")];
        let catalog = ActivityCatalog::new().with_activity("HDJ", 4.0);
        let expected = WeekGrid::new();
        let period = sample_period("T1");
        let ctx = AssignmentContext::new(&doctors, &catalog, &expected, &period);

        let outcome = RoundRobinEngine::new().assign(&ctx, 0);
        assert!((outcome.workload_hours["YC"] - 4.0).abs() < 1e-10);
    }
}
