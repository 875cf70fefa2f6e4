//! Weekly schedule builder.
//!
//! Expands activity ownership into full per-doctor weekly grids. Each
//! grid starts as a structural clone of the doctor's backbone (or an
//! empty grid), then required activities are appended into the slots
//! where the expected-activity matrix demands them.
//!
//! Backbone entries are never removed or reordered; an activity is only
//! appended when it fits the slot's duration capacity and does not clash
//! with a different required activity already fixed in the backbone.
//! Anything that cannot be placed is left out and surfaces downstream as
//! a coverage gap.

use std::collections::BTreeMap;

use tracing::debug;

use crate::models::{
    ActivityCatalog, Doctor, TimeSlot, WeekGrid, WeeklySchedule, SLOT_CAPACITY_HOURS,
};

/// Builds per-doctor weekly schedules from ownership maps.
#[derive(Debug, Clone)]
pub struct ScheduleBuilder {
    slot_capacity_hours: f64,
}

impl ScheduleBuilder {
    /// Creates a builder with the default 4-hour slot capacity.
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

    /// Expands an ownership map into weekly schedules for every doctor.
    ///
    /// `assignments` maps units to owners; a unit may be an activity code
    /// (strict engine) or a rotation label equal to a grouping root
    /// (simplified engine). The owner of an expected activity is looked
    /// up by its own code first, then by its grouping root.
    pub fn build(
        &self,
        doctors: &[Doctor],
        catalog: &ActivityCatalog,
        expected: &WeekGrid,
        assignments: &BTreeMap<String, String>,
    ) -> BTreeMap<String, WeeklySchedule> {
        let mut grids: BTreeMap<String, WeekGrid> = doctors
            .iter()
            .map(|d| (d.code.clone(), d.backbone.clone().unwrap_or_default()))
            .collect();
        let backbones: BTreeMap<&str, &WeekGrid> = doctors
            .iter()
            .filter_map(|d| d.backbone.as_ref().map(|b| (d.code.as_str(), b)))
            .collect();

        for slot in TimeSlot::week() {
            let required = expected.activities_at(slot);
            for code in required {
                let owner = assignments
                    .get(code)
                    .or_else(|| assignments.get(catalog.grouping_root(code)));
                let Some(owner) = owner else { continue };
                let Some(grid) = grids.get_mut(owner) else {
                    continue;
                };
                if grid.contains(slot, code) {
                    continue;
                }

                let used = grid.hours_at(slot, catalog);
                if used + catalog.duration_hours(code) > self.slot_capacity_hours {
                    debug!(
                        activity = %code,
                        doctor = %owner,
                        %slot,
                        "slot capacity exhausted, leaving activity unplaced"
                    );
                    continue;
                }

                let backbone_clash = backbones.get(owner.as_str()).is_some_and(|backbone| {
                    backbone
                        .activities_at(slot)
                        .iter()
                        .any(|fixed| fixed != code && required.contains(fixed))
                });
                if backbone_clash {
                    debug!(
                        activity = %code,
                        doctor = %owner,
                        %slot,
                        "backbone already holds a different required activity"
                    );
                    continue;
                }

                grid.add(slot, code.clone());
            }
        }

        grids
            .into_iter()
            .map(|(doctor, grid)| (doctor.clone(), WeeklySchedule::new(doctor, grid)))
            .collect()
    }
}

impl Default for ScheduleBuilder {
    fn default() -> Self {
        Self::new()
    }
}
