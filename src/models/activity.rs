//! Activity catalog: durations and grouping families.
//!
//! Every clinical activity is identified by a short code (e.g. an
//! inpatient-consultation code `HTC1`, a day-hospital code `HDJ`) and has
//! a fixed duration in hours. Some activities are grouped: a sub-activity
//! carries a recognized suffix (e.g. `HTC1_visite`) and shares a grouping
//! root with its primary activity. Grouped activities must always be owned
//! by the same doctor within a rotation period, and qualification for a
//! sub-activity routes through the root code.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default recognized sub-activity suffix.
const VISIT_SUFFIX: &str = "_visite";

/// Static catalog of activity codes, durations, and grouping rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityCatalog {
    /// Activity code → duration in hours.
    durations: BTreeMap<String, f64>,
    /// Recognized sub-activity suffixes, stripped to obtain the grouping root.
    group_suffixes: Vec<String>,
}

impl ActivityCatalog {
    /// Creates an empty catalog with the default `_visite` grouping suffix.
    pub fn new() -> Self {
        Self {
            durations: BTreeMap::new(),
            group_suffixes: vec![VISIT_SUFFIX.to_string()],
        }
    }

    /// Registers an activity with its duration in hours.
    pub fn with_activity(mut self, code: impl Into<String>, duration_hours: f64) -> Self {
        self.durations.insert(code.into(), duration_hours);
        self
    }

    /// Registers an additional recognized grouping suffix.
    pub fn with_group_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.group_suffixes.push(suffix.into());
        self
    }

    /// Whether the catalog knows this activity code.
    pub fn contains(&self, code: &str) -> bool {
        self.durations.contains_key(code)
    }

    /// Duration of an activity in hours (0.0 for unknown codes).
    pub fn duration_hours(&self, code: &str) -> f64 {
        self.durations.get(code).copied().unwrap_or(0.0)
    }

    /// All registered activity codes, in lexicographic order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.durations.keys().map(String::as_str)
    }

    /// Resolves an activity code to its grouping root.
    ///
    /// A recognized suffix is stripped (`HTC1_visite` → `HTC1`);
    /// unrecognized codes are their own root.
    pub fn grouping_root<'a>(&self, code: &'a str) -> &'a str {
        for suffix in &self.group_suffixes {
            if let Some(root) = code.strip_suffix(suffix.as_str()) {
                if !root.is_empty() {
                    return root;
                }
            }
        }
        code
    }

    /// All catalog codes sharing a grouping root with `code`, including
    /// `code` itself when registered. Lexicographic order.
    pub fn family(&self, code: &str) -> Vec<String> {
        let root = self.grouping_root(code);
        self.durations
            .keys()
            .filter(|c| self.grouping_root(c) == root)
            .cloned()
            .collect()
    }

    /// Whether an activity belongs to a grouping family of two or more
    /// registered codes.
    pub fn is_grouped(&self, code: &str) -> bool {
        self.family(code).len() > 1
    }
}

impl Default for ActivityCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> ActivityCatalog {
        ActivityCatalog::new()
            .with_activity("HTC1", 2.5)
            .with_activity("HTC1_visite", 1.0)
            .with_activity("HTC2", 2.5)
            .with_activity("HDJ", 4.0)
            .with_activity("EMIT", 3.0)
    }

    #[test]
    fn test_durations() {
        let cat = sample_catalog();
        assert!((cat.duration_hours("HDJ") - 4.0).abs() < 1e-10);
        assert!((cat.duration_hours("HTC1_visite") - 1.0).abs() < 1e-10);
        assert!((cat.duration_hours("UNKNOWN") - 0.0).abs() < 1e-10);
        assert!(cat.contains("EMIT"));
        assert!(!cat.contains("UNKNOWN"));
    }

    #[test]
    fn test_grouping_root() {
        let cat = sample_catalog();
        assert_eq!(cat.grouping_root("HTC1_visite"), "HTC1");
        assert_eq!(cat.grouping_root("HTC1"), "HTC1");
        assert_eq!(cat.grouping_root("HDJ"), "HDJ");
        // A bare suffix is not stripped to an empty root
        assert_eq!(cat.grouping_root("_visite"), "_visite");
    }

    #[test]
    fn test_family() {
        let cat = sample_catalog();
        assert_eq!(cat.family("HTC1"), vec!["HTC1", "HTC1_visite"]);
        assert_eq!(cat.family("HTC1_visite"), vec!["HTC1", "HTC1_visite"]);
        assert_eq!(cat.family("HDJ"), vec!["HDJ"]);
        assert!(cat.is_grouped("HTC1"));
        assert!(!cat.is_grouped("HTC2"));
    }

    #[test]
    fn test_extra_suffix() {
        let cat = ActivityCatalog::new()
            .with_group_suffix("_contre_visite")
            .with_activity("HTC3", 2.0)
            .with_activity("HTC3_contre_visite", 0.5);
        assert_eq!(cat.grouping_root("HTC3_contre_visite"), "HTC3");
        assert!(cat.is_grouped("HTC3"));
    }
}
