//! Input assembly.
//!
//! Turns raw person records, as read from an external table, into a
//! [`SchedulingRequest`]:
//!
//! 1. Resolve wrapped intervals (see [`clamp_to_week`])
//! 2. Subtract blocked time (e.g. commitments elsewhere)
//! 3. Convert minutes to grid units; times must be aligned to the grid
//! 4. Resolve the assignment cap
//! 5. Validate the finished request
//!
//! A bad record fails the whole assembly with an error naming the person;
//! records are never skipped silently.

use serde::{Deserialize, Serialize};

use crate::algebra::subtract;
use crate::error::{CohortError, PersonDataError};
use crate::models::{
    clamp_to_week, Interval, Person, PersonType, SchedulingRequest, TimeGrid, MINUTES_PER_WEEK,
};
use crate::validation::{validate_request, ValidationError, ValidationErrorKind};

/// Where a role's assignment caps come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CapPolicy {
    /// Same cap for everyone in the role.
    Fixed(u32),
    /// Read from each record's `cap` field.
    PerRecord,
}

/// One person as read from the data source. Times are minutes since
/// Monday 00:00.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonRecord {
    /// Source record id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Available `(start, end)` ranges.
    pub availability_minutes: Vec<(u32, u32)>,
    /// Ranges to remove from the availability.
    #[serde(default)]
    pub blocked_minutes: Vec<(u32, u32)>,
    /// Raw cap value, read under [`CapPolicy::PerRecord`].
    #[serde(default)]
    pub cap: Option<f64>,
}

/// A role and the records of its people.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleSource {
    /// Role name.
    pub name: String,
    /// Fewest people of this role per cohort.
    pub min_per_cohort: u32,
    /// Most people of this role per cohort.
    pub max_per_cohort: u32,
    /// Where assignment caps come from.
    pub cap: CapPolicy,
    /// People holding this role.
    pub records: Vec<PersonRecord>,
}

impl PersonRecord {
    /// Creates a record with no availability.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            availability_minutes: Vec::new(),
            blocked_minutes: Vec::new(),
            cap: None,
        }
    }

    /// Adds an availability range in minutes.
    pub fn with_availability(mut self, start: u32, end: u32) -> Self {
        self.availability_minutes.push((start, end));
        self
    }

    /// Adds a blocked range in minutes.
    pub fn with_blocked(mut self, start: u32, end: u32) -> Self {
        self.blocked_minutes.push((start, end));
        self
    }

    /// Sets the per-record cap value.
    pub fn with_cap(mut self, cap: f64) -> Self {
        self.cap = Some(cap);
        self
    }
}

impl RoleSource {
    /// Creates a role source with a fixed cap of one cohort per person.
    pub fn new(name: impl Into<String>, min_per_cohort: u32, max_per_cohort: u32) -> Self {
        Self {
            name: name.into(),
            min_per_cohort,
            max_per_cohort,
            cap: CapPolicy::Fixed(1),
            records: Vec::new(),
        }
    }

    /// Sets the cap policy.
    pub fn with_cap(mut self, cap: CapPolicy) -> Self {
        self.cap = cap;
        self
    }

    /// Adds a record.
    pub fn with_record(mut self, record: PersonRecord) -> Self {
        self.records.push(record);
        self
    }
}

/// Assembles a validated scheduling request.
///
/// # Errors
/// - [`CohortError::Assembly`] for the first bad person record
/// - [`CohortError::InvalidRequest`] for an invalid grid, a misaligned
///   meeting length or an invalid request (e.g. duplicate role names)
pub fn assemble(
    meeting_minutes: u32,
    roles: &[RoleSource],
    grid: &TimeGrid,
) -> Result<SchedulingRequest, CohortError> {
    if !grid.is_valid() {
        return Err(CohortError::InvalidRequest(vec![ValidationError::new(
            ValidationErrorKind::InvalidTimeGrid,
            format!(
                "Time grid unit of {} minutes must be positive and divide 60",
                grid.minutes_per_unit
            ),
        )]));
    }

    let meeting_duration = grid.unit_from_minutes(meeting_minutes).map_err(|e| {
        CohortError::InvalidRequest(vec![ValidationError::new(
            ValidationErrorKind::InvalidMeetingDuration,
            format!("Meeting length: {e}"),
        )])
    })?;

    let mut request = SchedulingRequest::new(meeting_duration);
    for source in roles {
        let mut role = PersonType::new(&source.name, source.min_per_cohort, source.max_per_cohort);
        for record in &source.records {
            let person = assemble_person(record, &source.cap, grid)
                .map_err(|e| e.for_person(&source.name, &record.id, &record.name))?;
            role.people.push(person);
        }
        tracing::debug!(role = %role.name, people = role.people.len(), "assembled role");
        request.roles.push(role);
    }

    validate_request(&request).map_err(CohortError::InvalidRequest)?;
    Ok(request)
}

fn assemble_person(
    record: &PersonRecord,
    cap: &CapPolicy,
    grid: &TimeGrid,
) -> Result<Person, PersonDataError> {
    let availability = week_intervals(&record.availability_minutes)?;
    let blocked = week_intervals(&record.blocked_minutes)?;

    let intervals = subtract(&availability, &blocked)
        .into_iter()
        .filter(|w| !w.is_empty())
        .map(|w| grid.interval_from_minutes(w.start, w.end))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Person::new(&record.id)
        .with_name(&record.name)
        .with_intervals(intervals)
        .with_max_assignments(resolve_cap(record, cap)?))
}

fn week_intervals(ranges: &[(u32, u32)]) -> Result<Vec<Interval>, PersonDataError> {
    ranges
        .iter()
        .map(|&(start, end)| {
            if start > MINUTES_PER_WEEK || end > MINUTES_PER_WEEK {
                return Err(PersonDataError::IntervalOutOfRange { start, end });
            }
            Ok(clamp_to_week(start, end, MINUTES_PER_WEEK))
        })
        .collect()
}

fn resolve_cap(record: &PersonRecord, cap: &CapPolicy) -> Result<u32, PersonDataError> {
    match cap {
        CapPolicy::Fixed(n) => Ok(*n),
        CapPolicy::PerRecord => {
            let value = record.cap.ok_or(PersonDataError::MissingCap)?;
            if value.fract() != 0.0 || !value.is_finite() {
                return Err(PersonDataError::NonIntegerCap(value));
            }
            if value < 0.0 {
                return Err(PersonDataError::NegativeCap(value));
            }
            if value > f64::from(u32::MAX) {
                return Err(PersonDataError::CapTooLarge(value));
            }
            Ok(value as u32)
        }
    }
}
