//! Error types.
//!
//! Infeasibility is not an error: a run that forms no cohort returns
//! `Ok(None)`. Errors here cover bad configuration and bad person data,
//! both detected before any model is built.

use thiserror::Error;

use crate::validation::ValidationError;

/// Crate-level error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CohortError {
    /// The request failed validation (duplicate role names, bad bounds, ...).
    #[error("invalid scheduling request: {}", join_messages(.0))]
    InvalidRequest(Vec<ValidationError>),

    /// A person record could not be turned into scheduler input.
    #[error(transparent)]
    Assembly(#[from] AssemblyError),
}

/// A per-person data error, tagged with the person it came from.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("in processing person \"{person_name}\" ({person_id}) of role '{role}': {source}")]
pub struct AssemblyError {
    /// Role the record was read for.
    pub role: String,
    /// Source record id.
    pub person_id: String,
    /// Source record display name.
    pub person_name: String,
    /// What was wrong with the record.
    #[source]
    pub source: PersonDataError,
}

/// What was wrong with a single person record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PersonDataError {
    /// A time does not fall on a grid unit boundary.
    #[error("time {minutes} min is not aligned to {minutes_per_unit}-minute units")]
    MisalignedTime { minutes: u32, minutes_per_unit: u32 },

    /// The cap field has a fractional part or is not finite.
    #[error("assignment cap {0} is not an integer")]
    NonIntegerCap(f64),

    /// The cap field is below zero.
    #[error("assignment cap {0} is negative")]
    NegativeCap(f64),

    /// The cap field is larger than any assignment count.
    #[error("assignment cap {0} is too large")]
    CapTooLarge(f64),

    /// The role reads caps per record but this record has none.
    #[error("assignment cap is missing")]
    MissingCap,

    /// A minute offset lies past the end of the week.
    #[error("interval [{start}, {end}) is outside the week")]
    IntervalOutOfRange { start: u32, end: u32 },
}

impl PersonDataError {
    /// Attaches the originating person to this error.
    pub fn for_person(
        self,
        role: impl Into<String>,
        person_id: impl Into<String>,
        person_name: impl Into<String>,
    ) -> AssemblyError {
        AssemblyError {
            role: role.into(),
            person_id: person_id.into(),
            person_name: person_name.into(),
            source: self,
        }
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_assembly_error_message() {
        let err = PersonDataError::NonIntegerCap(1.5).for_person("Facilitator", "rec7", "Grace");
        let msg = err.to_string();
        assert!(msg.contains("Grace"));
        assert!(msg.contains("rec7"));
        assert!(msg.contains("Facilitator"));
        assert!(msg.contains("1.5"));
    }

    #[test]
    fn test_invalid_request_message_names_role() {
        let err = CohortError::InvalidRequest(vec![ValidationError {
            kind: ValidationErrorKind::DuplicateRole,
            message: "Duplicate role name: Participant".into(),
        }]);
        assert!(err.to_string().contains("Participant"));
    }
}
