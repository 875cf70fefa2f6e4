//! Schedule validation, analysis, and reporting.
//!
//! Works on completed schedules from either engine. Computes per-slot
//! expected vs. assigned activity sets, missing and duplicate
//! assignments, an overall coverage percentage, and rule compliance
//! (slot-duration and capability checks). A separate exclusivity check
//! verifies that no activity has more than one recorded owner within a
//! rotation period.
//!
//! Violations are reported as data; nothing here blocks or repairs a
//! schedule.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::models::{
    ActivityCatalog, AssignmentOutcome, Doctor, HalfDay, RuleViolation, TimeSlot, WeekGrid,
    WeeklySchedule, Weekday, SLOT_CAPACITY_HOURS,
};

/// Expected vs. assigned activities for one weekly slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotReport {
    /// Day of the slot.
    pub weekday: Weekday,
    /// Half-day of the slot.
    pub half_day: HalfDay,
    /// Required activity codes.
    pub expected: Vec<String>,
    /// Required activities actually present in some doctor's grid.
    pub assigned: Vec<String>,
    /// Required activities present in no grid.
    pub missing: Vec<String>,
    /// Required activities present in more than one doctor's grid.
    pub duplicates: Vec<String>,
}

impl SlotReport {
    /// A slot is covered iff nothing required is missing.
    pub fn is_covered(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Full analysis of one week of schedules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekAnalysis {
    /// Per-slot reports, in chronological order.
    pub slots: Vec<SlotReport>,
    /// Covered slots ÷ total slots × 100.
    pub coverage_pct: f64,
    /// Duration and capability violations.
    pub violations: Vec<RuleViolation>,
    /// One human-readable recommendation per uncovered requirement.
    pub recommendations: Vec<String>,
}

impl WeekAnalysis {
    /// Whether the week is fully covered with no violations.
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty() && self.slots.iter().all(SlotReport::is_covered)
    }
}

/// One recorded activity ownership, scoped to a rotation period.
///
/// Flattened form used by the exclusivity check, which tolerates
/// multiple records per (period, activity) pair coming from different
/// sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnershipRecord {
    /// Rotation period name.
    pub period: String,
    /// Activity code.
    pub activity: String,
    /// Recorded owner.
    pub doctor: String,
}

impl OwnershipRecord {
    /// Creates a record.
    pub fn new(
        period: impl Into<String>,
        activity: impl Into<String>,
        doctor: impl Into<String>,
    ) -> Self {
        Self {
            period: period.into(),
            activity: activity.into(),
            doctor: doctor.into(),
        }
    }

    /// Flattens an engine outcome into ownership records for one period.
    pub fn from_outcome(period: &str, outcome: &AssignmentOutcome) -> Vec<Self> {
        outcome
            .assignments
            .iter()
            .map(|(activity, doctor)| Self::new(period, activity.clone(), doctor.clone()))
            .collect()
    }
}

/// Validates completed schedules against the expected-activity matrix.
#[derive(Debug, Clone)]
pub struct ScheduleAnalyzer {
    slot_capacity_hours: f64,
}

impl ScheduleAnalyzer {
    /// Creates an analyzer with the default 4-hour slot capacity.
    pub fn new() -> Self {
        Self {
            slot_capacity_hours: SLOT_CAPACITY_HOURS,
        }
    }

    /// Overrides the slot duration capacity.
    pub fn with_slot_capacity(mut self, hours: f64) -> Self {
        self.slot_capacity_hours = hours;
        self
    }

    /// Analyzes one week of schedules: coverage, duplicates, duration and
    /// capability compliance.
    pub fn analyze_week(
        &self,
        schedules: &BTreeMap<String, WeeklySchedule>,
        doctors: &[Doctor],
        catalog: &ActivityCatalog,
        expected: &WeekGrid,
    ) -> WeekAnalysis {
        let roster: BTreeMap<&str, &Doctor> =
            doctors.iter().map(|d| (d.code.as_str(), d)).collect();

        let mut slots = Vec::with_capacity(TimeSlot::week_len());
        let mut violations = Vec::new();
        let mut recommendations = Vec::new();
        let mut covered = 0usize;

        for slot in TimeSlot::week() {
            let required: Vec<String> = expected.activities_at(slot).to_vec();
            let required_set: BTreeSet<&str> =
                required.iter().map(String::as_str).collect();

            // Who holds which required activity in this slot
            let mut holders: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
            for (doctor, schedule) in schedules {
                for code in schedule.grid.activities_at(slot) {
                    if required_set.contains(code.as_str()) {
                        holders.entry(code.as_str()).or_default().push(doctor);
                    }
                }
            }

            let assigned: Vec<String> = required
                .iter()
                .filter(|c| holders.contains_key(c.as_str()))
                .cloned()
                .collect();
            let missing: Vec<String> = required
                .iter()
                .filter(|c| !holders.contains_key(c.as_str()))
                .cloned()
                .collect();
            let duplicates: Vec<String> = required
                .iter()
                .filter(|c| holders.get(c.as_str()).map_or(0, Vec::len) > 1)
                .cloned()
                .collect();

            for code in &missing {
                recommendations.push(format!(
                    "activity '{code}' is uncovered on {slot}: no doctor's schedule holds it"
                ));
            }

            if missing.is_empty() {
                covered += 1;
            }

            slots.push(SlotReport {
                weekday: slot.weekday,
                half_day: slot.half_day,
                expected: required,
                assigned,
                missing,
                duplicates,
            });
        }

        // Rule compliance over every doctor's populated grid
        for (doctor_code, schedule) in schedules {
            for slot in TimeSlot::week() {
                let hours = schedule.grid.hours_at(slot, catalog);
                if hours > self.slot_capacity_hours {
                    violations.push(RuleViolation::slot_overload(
                        doctor_code.clone(),
                        format!(
                            "doctor '{doctor_code}' holds {hours}h on {slot}, above the {}h slot capacity",
                            self.slot_capacity_hours
                        ),
                    ));
                }

                let required = expected.activities_at(slot);
                for code in schedule.grid.activities_at(slot) {
                    if !required.contains(code) {
                        continue;
                    }
                    let root = catalog.grouping_root(code);
                    let qualified = roster
                        .get(doctor_code.as_str())
                        .is_some_and(|d| d.can_perform(root));
                    if !qualified {
                        violations.push(RuleViolation::missing_capability(
                            doctor_code.clone(),
                            format!(
                                "doctor '{doctor_code}' is assigned '{code}' on {slot} without '{root}' in their rotation setting"
                            ),
                        ));
                    }
                }
            }
        }

        let coverage_pct = covered as f64 / TimeSlot::week_len() as f64 * 100.0;

        WeekAnalysis {
            slots,
            coverage_pct,
            violations,
            recommendations,
        }
    }
}

impl Default for ScheduleAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Flags every (period, activity) pair with more than one distinct
/// recorded owner.
///
/// The strict engine's exclusive-ownership invariant makes this
/// impossible for its own outcomes; any violation here is a defect in
/// the recording pipeline.
pub fn check_exclusivity(records: &[OwnershipRecord]) -> Vec<RuleViolation> {
    let mut owners: BTreeMap<(&str, &str), BTreeSet<&str>> = BTreeMap::new();
    for record in records {
        owners
            .entry((record.period.as_str(), record.activity.as_str()))
            .or_default()
            .insert(record.doctor.as_str());
    }

    owners
        .into_iter()
        .filter(|(_, doctors)| doctors.len() > 1)
        .map(|((period, activity), doctors)| {
            let list: Vec<&str> = doctors.into_iter().collect();
            RuleViolation::shared_ownership(
                activity,
                format!(
                    "activity '{activity}' has {} owners in period '{period}': {}",
                    list.len(),
                    list.join(", ")
                ),
            )
        })
        .collect()
}

/// Workload distribution summary for one engine outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentStats {
    /// Total assigned duration-hours.
    pub total_hours: f64,
    /// Doctor code → assigned hours (zero-workload doctors included).
    pub hours_by_doctor: BTreeMap<String, f64>,
    /// Smallest per-doctor workload.
    pub min_hours: f64,
    /// Largest per-doctor workload.
    pub max_hours: f64,
    /// Mean per-doctor workload.
    pub mean_hours: f64,
    /// Workload spread (max − min).
    pub imbalance_hours: f64,
    /// Units left without an owner.
    pub unassigned_count: usize,
}

impl AssignmentStats {
    /// Computes workload statistics from an outcome over a roster.
    pub fn calculate(outcome: &AssignmentOutcome, doctors: &[Doctor]) -> Self {
        let mut hours_by_doctor: BTreeMap<String, f64> = doctors
            .iter()
            .map(|d| (d.code.clone(), 0.0))
            .collect();
        for (doctor, hours) in &outcome.workload_hours {
            *hours_by_doctor.entry(doctor.clone()).or_insert(0.0) += hours;
        }

        let total_hours: f64 = hours_by_doctor.values().sum();
        let count = hours_by_doctor.len();
        let min_hours = hours_by_doctor.values().copied().fold(f64::INFINITY, f64::min);
        let max_hours = hours_by_doctor
            .values()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        let (min_hours, max_hours) = if count == 0 {
            (0.0, 0.0)
        } else {
            (min_hours, max_hours)
        };
        let mean_hours = if count == 0 {
            0.0
        } else {
            total_hours / count as f64
        };

        Self {
            total_hours,
            hours_by_doctor,
            min_hours,
            max_hours,
            mean_hours,
            imbalance_hours: max_hours - min_hours,
            unassigned_count: outcome.unassigned.len(),
        }
    }

    /// Whether the workload spread stays under a threshold.
    pub fn is_balanced(&self, max_imbalance_hours: f64) -> bool {
        self.imbalance_hours <= max_imbalance_hours
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(weekday: Weekday, half_day: HalfDay) -> TimeSlot {
        TimeSlot::new(weekday, half_day)
    }

    fn monday_am() -> TimeSlot {
        slot(Weekday::Monday, HalfDay::Morning)
    }

    fn sample_catalog() -> ActivityCatalog {
        ActivityCatalog::new()
            .with_activity("HTC1", 2.5)
            .with_activity("HTC1_visite", 1.0)
            .with_activity("HDJ", 4.0)
            .with_activity("EMIT", 3.0)
    }

    fn schedules_of(entries: &[(&str, TimeSlot, &str)]) -> BTreeMap<String, WeeklySchedule> {
        let mut out: BTreeMap<String, WeekGrid> = BTreeMap::new();
        for (doctor, slot, code) in entries {
            out.entry(doctor.to_string()).or_default().add(*slot, *code);
        }
        out.into_iter()
            .map(|(doctor, grid)| (doctor.clone(), WeeklySchedule::new(doctor, grid)))
            .collect()
    }

    #[test]
    fn test_full_coverage() {
        let doctors = vec![Doctor::new("YC").with_capabilities(["HDJ", "EMIT"])];
        let expected = WeekGrid::new()
            .with_entry(monday_am(), "HDJ")
            .with_entry(slot(Weekday::Tuesday, HalfDay::Morning), "EMIT");
        let schedules = schedules_of(&[
            ("YC", monday_am(), "HDJ"),
            ("YC", slot(Weekday::Tuesday, HalfDay::Morning), "EMIT"),
        ]);

        let analysis =
            ScheduleAnalyzer::new().analyze_week(&schedules, &doctors, &sample_catalog(), &expected);

        assert!((analysis.coverage_pct - 100.0).abs() < 1e-10);
        assert!(analysis.is_clean());
        assert!(analysis.recommendations.is_empty());
    }

    #[test]
    fn test_missing_activity_reduces_coverage() {
        let doctors = vec![Doctor::new("YC").with_capability("HDJ")];
        let expected = WeekGrid::new()
            .with_entry(monday_am(), "HDJ")
            .with_entry(monday_am(), "EMIT");
        let schedules = schedules_of(&[("YC", monday_am(), "HDJ")]);

        let analysis =
            ScheduleAnalyzer::new().analyze_week(&schedules, &doctors, &sample_catalog(), &expected);

        // 9 of 10 slots trivially covered, Monday morning misses EMIT
        assert!((analysis.coverage_pct - 90.0).abs() < 1e-10);
        assert_eq!(analysis.slots[0].missing, vec!["EMIT"]);
        assert_eq!(analysis.recommendations.len(), 1);
        assert!(analysis.recommendations[0].contains("EMIT"));
    }

    #[test]
    fn test_duplicate_assignment_detected() {
        let doctors = vec![
            Doctor::new("YC").with_capability("HDJ"),
            Doctor::new("MB").with_capability("HDJ"),
        ];
        let expected = WeekGrid::new().with_entry(monday_am(), "HDJ");
        let schedules = schedules_of(&[
            ("YC", monday_am(), "HDJ"),
            ("MB", monday_am(), "HDJ"),
        ]);

        let analysis =
            ScheduleAnalyzer::new().analyze_week(&schedules, &doctors, &sample_catalog(), &expected);

        assert_eq!(analysis.slots[0].duplicates, vec!["HDJ"]);
    }

    #[test]
    fn test_duration_violation_caught_even_when_placed() {
        // HDJ (4h) + EMIT (3h) in the same doctor's slot: 7h > 4h must be
        // flagged even though a schedule was built containing both.
        let doctors = vec![Doctor::new("YC").with_capabilities(["HDJ", "EMIT"])];
        let expected = WeekGrid::new()
            .with_entry(monday_am(), "HDJ")
            .with_entry(monday_am(), "EMIT");
        let schedules = schedules_of(&[
            ("YC", monday_am(), "HDJ"),
            ("YC", monday_am(), "EMIT"),
        ]);

        let analysis =
            ScheduleAnalyzer::new().analyze_week(&schedules, &doctors, &sample_catalog(), &expected);

        let overloads: Vec<&RuleViolation> = analysis
            .violations
            .iter()
            .filter(|v| v.kind == crate::models::ViolationKind::SlotOverload)
            .collect();
        assert_eq!(overloads.len(), 1);
        assert_eq!(overloads[0].entity, "YC");
    }

    #[test]
    fn test_capability_violation() {
        // MB holds HTC1_visite without listing HTC1
        let doctors = vec![
            Doctor::new("YC").with_capability("HTC1"),
            Doctor::new("MB").with_capability("HDJ"),
        ];
        let expected = WeekGrid::new().with_entry(monday_am(), "HTC1_visite");
        let schedules = schedules_of(&[("MB", monday_am(), "HTC1_visite")]);

        let analysis =
            ScheduleAnalyzer::new().analyze_week(&schedules, &doctors, &sample_catalog(), &expected);

        let capability: Vec<&RuleViolation> = analysis
            .violations
            .iter()
            .filter(|v| v.kind == crate::models::ViolationKind::MissingCapability)
            .collect();
        assert_eq!(capability.len(), 1);
        assert_eq!(capability[0].entity, "MB");
        assert!(capability[0].message.contains("HTC1"));
    }

    #[test]
    fn test_backbone_only_codes_do_not_trigger_capability_check() {
        // A personal fixed commitment outside the required set is not a
        // capability violation.
        let doctors = vec![Doctor::new("YC").with_capability("HDJ")];
        let expected = WeekGrid::new();
        let schedules = schedules_of(&[("YC", monday_am(), "EMIT")]);

        let analysis =
            ScheduleAnalyzer::new().analyze_week(&schedules, &doctors, &sample_catalog(), &expected);
        assert!(analysis.violations.is_empty());
    }

    #[test]
    fn test_exclusivity_clean() {
        let records = vec![
            OwnershipRecord::new("P1", "HDJ", "YC"),
            OwnershipRecord::new("P1", "EMIT", "MB"),
            OwnershipRecord::new("P2", "HDJ", "MB"),
        ];
        assert!(check_exclusivity(&records).is_empty());
    }

    #[test]
    fn test_exclusivity_violation() {
        // Same activity, same period, two owners
        let records = vec![
            OwnershipRecord::new("P1", "HDJ", "YC"),
            OwnershipRecord::new("P1", "HDJ", "MB"),
            OwnershipRecord::new("P2", "HDJ", "YC"),
        ];
        let violations = check_exclusivity(&records);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, crate::models::ViolationKind::SharedOwnership);
        assert_eq!(violations[0].entity, "HDJ");
        assert!(violations[0].message.contains("P1"));
    }

    #[test]
    fn test_strict_outcomes_always_pass_exclusivity() {
        let mut outcome = AssignmentOutcome::new();
        outcome.record("HDJ", "YC", 4.0);
        outcome.record("EMIT", "MB", 3.0);
        let records = OwnershipRecord::from_outcome("P1", &outcome);
        assert!(check_exclusivity(&records).is_empty());
    }

    #[test]
    fn test_stats() {
        let doctors = vec![
            Doctor::new("YC").with_capability("HDJ"),
            Doctor::new("MB").with_capability("EMIT"),
            Doctor::new("AL").with_capability("HDJ"),
        ];
        let mut outcome = AssignmentOutcome::new();
        outcome.record("HDJ", "YC", 4.0);
        outcome.record("EMIT", "MB", 3.0);
        outcome.unassigned.push("HTC1".to_string());

        let stats = AssignmentStats::calculate(&outcome, &doctors);

        assert!((stats.total_hours - 7.0).abs() < 1e-10);
        assert!((stats.min_hours - 0.0).abs() < 1e-10); // AL has nothing
        assert!((stats.max_hours - 4.0).abs() < 1e-10);
        assert!((stats.imbalance_hours - 4.0).abs() < 1e-10);
        assert_eq!(stats.unassigned_count, 1);
        assert!(stats.is_balanced(4.0));
        assert!(!stats.is_balanced(3.9));
    }

    #[test]
    fn test_stats_empty() {
        let stats = AssignmentStats::calculate(&AssignmentOutcome::new(), &[]);
        assert!((stats.total_hours - 0.0).abs() < 1e-10);
        assert!((stats.imbalance_hours - 0.0).abs() < 1e-10);
        assert_eq!(stats.unassigned_count, 0);
    }
}
