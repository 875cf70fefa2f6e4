//! Qualification index and coverage gap analysis.
//!
//! The index maps each activity to the doctors qualified to perform it,
//! derived from the static capability lists. Qualification for a grouped
//! sub-activity routes through its grouping root: a doctor listing `HTC1`
//! is qualified for `HTC1_visite` even when the sub-activity code never
//! appears in any capability list.
//!
//! The gap analyzer is cheap and purely derived; it is recomputed on
//! every call rather than cached.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{ActivityCatalog, Doctor};

/// Activity → qualified doctors, with the inverse direction kept alongside.
///
/// Doctor lists are ordered-unique: insertion order equals roster
/// iteration order, duplicates are dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QualificationIndex {
    /// Capability code → doctor codes qualified for it.
    by_activity: BTreeMap<String, Vec<String>>,
    /// Doctor code → capability codes, as listed in the roster.
    by_doctor: BTreeMap<String, Vec<String>>,
}

impl QualificationIndex {
    /// Builds the index from a doctor roster.
    pub fn build(doctors: &[Doctor]) -> Self {
        let mut by_activity: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut by_doctor: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for doctor in doctors {
            by_doctor
                .entry(doctor.code.clone())
                .or_default()
                .extend(doctor.capabilities.iter().cloned());
            for capability in &doctor.capabilities {
                let entry = by_activity.entry(capability.clone()).or_default();
                if !entry.contains(&doctor.code) {
                    entry.push(doctor.code.clone());
                }
            }
        }

        Self {
            by_activity,
            by_doctor,
        }
    }

    /// Doctors qualified for an activity, routed through its grouping root.
    pub fn qualified_for(&self, catalog: &ActivityCatalog, code: &str) -> &[String] {
        self.by_activity
            .get(catalog.grouping_root(code))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Capability codes listed by a doctor.
    pub fn capabilities_of(&self, doctor: &str) -> &[String] {
        self.by_doctor
            .get(doctor)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All capability codes appearing in any list, with their doctors.
    pub fn buckets(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.by_activity
            .iter()
            .map(|(code, doctors)| (code.as_str(), doctors.as_slice()))
    }
}

/// Qualification status of one required activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityCoverage {
    /// Activity code.
    pub code: String,
    /// Qualified doctor codes, in roster order.
    pub qualified: Vec<String>,
}

impl ActivityCoverage {
    /// Number of qualified doctors.
    pub fn count(&self) -> usize {
        self.qualified.len()
    }
}

/// Result of a coverage gap analysis over a closed activity list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoverageReport {
    /// Per-activity qualification status, in input order.
    pub activities: Vec<ActivityCoverage>,
    /// Activities with zero qualified doctors.
    pub uncovered: Vec<String>,
    /// One human-readable recommendation per uncovered activity.
    pub recommendations: Vec<String>,
}

impl CoverageReport {
    /// Whether every required activity has at least one qualified doctor.
    pub fn is_fully_covered(&self) -> bool {
        self.uncovered.is_empty()
    }
}

/// Analyzes qualification coverage for a closed list of required activities.
pub fn analyze_coverage(
    index: &QualificationIndex,
    catalog: &ActivityCatalog,
    required: &[String],
) -> CoverageReport {
    let mut report = CoverageReport::default();

    for code in required {
        let qualified = index.qualified_for(catalog, code).to_vec();
        if qualified.is_empty() {
            let root = catalog.grouping_root(code);
            report.uncovered.push(code.clone());
            report.recommendations.push(format!(
                "no qualified doctor for '{code}': add '{root}' to a doctor's rotation setting"
            ));
        }
        report.activities.push(ActivityCoverage {
            code: code.clone(),
            qualified,
        });
    }

    report
}
