//! Input validation for scheduling requests.
//!
//! Checks structural integrity of a [`SchedulingRequest`] before any
//! model is built. Detects:
//! - Duplicate role names
//! - Duplicate person ids within a role
//! - Role bounds with `min > max`
//! - A zero meeting duration
//! - Inverted availability intervals

use crate::models::SchedulingRequest;
use std::collections::HashSet;
use std::fmt;

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
    /// Two roles share the same name.
    DuplicateRole,
    /// A role has an empty name.
    EmptyRoleName,
    /// A role's minimum per cohort exceeds its maximum.
    InvalidRoleBounds,
    /// Two people in the same role share an id.
    DuplicatePerson,
    /// Meeting duration is zero.
    InvalidMeetingDuration,
    /// An availability interval ends before it starts.
    InvalidInterval,
    /// The time grid unit is zero or does not divide an hour.
    InvalidTimeGrid,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a scheduling request.
///
/// Checks:
/// 1. Meeting duration is positive
/// 2. Role names are non-empty and unique
/// 3. `min_per_cohort <= max_per_cohort` for every role
/// 4. Person ids are unique within each role
/// 5. Every availability interval has `start <= end`
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_request(request: &SchedulingRequest) -> ValidationResult {
    let mut errors = Vec::new();

    if request.meeting_duration == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidMeetingDuration,
            "Meeting duration must be at least one unit",
        ));
    }

    let mut role_names = HashSet::new();
    for role in &request.roles {
        if role.name.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyRoleName,
                "Role with an empty name",
            ));
        } else if !role_names.insert(role.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateRole,
                format!("Duplicate role name: {}", role.name),
            ));
        }

        if role.min_per_cohort > role.max_per_cohort {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidRoleBounds,
                format!(
                    "Role '{}' has min per cohort {} above max {}",
                    role.name, role.min_per_cohort, role.max_per_cohort
                ),
            ));
        }

        let mut person_ids = HashSet::new();
        for person in &role.people {
            if !person_ids.insert(person.id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicatePerson,
                    format!("Duplicate person id '{}' in role '{}'", person.id, role.name),
                ));
            }

            for w in person.availability.iter().filter(|w| !w.is_valid()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidInterval,
                    format!(
                        "Person '{}' in role '{}' has inverted interval {}..{}",
                        person.id, role.name, w.start, w.end
                    ),
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
