//! Doctor model.
//!
//! Doctors are static reference data: a short code, an ordered capability
//! list (the "rotation setting" — activity codes the doctor may perform),
//! and an optional fixed weekly backbone grid. The engine never creates
//! or destroys doctors.

use serde::{Deserialize, Serialize};

use super::{TimeSlot, WeekGrid};

/// A member of the medical staff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    /// Short identifying code (e.g. initials).
    pub code: String,
    /// Ordered list of activity codes this doctor may perform.
    pub capabilities: Vec<String>,
    /// Fixed weekly commitments, never touched by the engines.
    pub backbone: Option<WeekGrid>,
}

impl Doctor {
    /// Creates a doctor with no capabilities and no backbone.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            capabilities: Vec::new(),
            backbone: None,
        }
    }

    /// Appends one capability.
    pub fn with_capability(mut self, activity: impl Into<String>) -> Self {
        self.capabilities.push(activity.into());
        self
    }

    /// Appends several capabilities, preserving order.
    pub fn with_capabilities<I, S>(mut self, activities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.capabilities.extend(activities.into_iter().map(Into::into));
        self
    }

    /// Sets the full backbone grid.
    pub fn with_backbone(mut self, backbone: WeekGrid) -> Self {
        self.backbone = Some(backbone);
        self
    }

    /// Adds one backbone entry, creating the grid if absent.
    pub fn with_backbone_entry(mut self, slot: TimeSlot, code: impl Into<String>) -> Self {
        self.backbone.get_or_insert_with(WeekGrid::new).add(slot, code);
        self
    }

    /// Whether this doctor's capability list contains the given root code.
    pub fn can_perform(&self, root: &str) -> bool {
        self.capabilities.iter().any(|c| c == root)
    }

    /// Total duration-hours implied by the capability list.
    pub fn capability_hours(&self, catalog: &super::ActivityCatalog) -> f64 {
        self.capabilities
            .iter()
            .map(|c| catalog.duration_hours(c))
            .sum()
    }
}
