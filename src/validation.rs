//! Input validation for the static reference data.
//!
//! Checks structural integrity of the roster, catalog, and
//! expected-activity matrix before the engines run. Detects:
//! - Duplicate doctor codes
//! - Empty capability lists
//! - Capability, backbone, or expected-matrix entries naming activities
//!   the catalog does not know

use std::collections::HashSet;

use crate::models::{ActivityCatalog, Doctor, TimeSlot, WeekGrid};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two doctors share the same code.
    DuplicateDoctorCode,
    /// A doctor has no capabilities at all.
    EmptyCapabilityList,
    /// A capability list names an activity missing from the catalog.
    UnknownCapability,
    /// A backbone slot names an activity missing from the catalog.
    UnknownBackboneActivity,
    /// The expected-activity matrix names an activity missing from the catalog.
    UnknownExpectedActivity,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the static reference data consumed by the engines.
///
/// Checks:
/// 1. No duplicate doctor codes
/// 2. Every doctor lists at least one capability
/// 3. Every capability entry is a catalog activity
/// 4. Every backbone entry is a catalog activity
/// 5. Every expected-matrix entry is a catalog activity
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_reference_data(
    doctors: &[Doctor],
    catalog: &ActivityCatalog,
    expected: &WeekGrid,
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut codes = HashSet::new();
    for doctor in doctors {
        if !codes.insert(doctor.code.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateDoctorCode,
                format!("Duplicate doctor code: {}", doctor.code),
            ));
        }

        if doctor.capabilities.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyCapabilityList,
                format!("Doctor '{}' has no capabilities", doctor.code),
            ));
        }

        for capability in &doctor.capabilities {
            if !catalog.contains(capability) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownCapability,
                    format!(
                        "Doctor '{}' lists unknown activity '{capability}'",
                        doctor.code
                    ),
                ));
            }
        }

        if let Some(backbone) = &doctor.backbone {
            for slot in TimeSlot::week() {
                for code in backbone.activities_at(slot) {
                    if !catalog.contains(code) {
                        errors.push(ValidationError::new(
                            ValidationErrorKind::UnknownBackboneActivity,
                            format!(
                                "Doctor '{}' backbone holds unknown activity '{code}' on {slot}",
                                doctor.code
                            ),
                        ));
                    }
                }
            }
        }
    }

    for slot in TimeSlot::week() {
        for code in expected.activities_at(slot) {
            if !catalog.contains(code) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownExpectedActivity,
                    format!("Expected matrix requires unknown activity '{code}' on {slot}"),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
