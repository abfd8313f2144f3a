//! Schedule solution model.
//!
//! A solution is an ordered list of cohorts: meeting instances with a
//! start unit and a fixed set of members per role. It may be checked
//! against its request, producing [`Violation`]s (see [`crate::verify`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Interval, TimeGrid, Unit};

/// A complete schedule: the output of one scheduling run.
///
/// Owned by the caller once returned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSolution {
    /// Cohorts, ordered by start unit.
    pub cohorts: Vec<Cohort>,
}

/// One scheduled meeting group.
///
/// Several cohorts may share a start unit; together they partition the
/// people assigned at that unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cohort {
    /// Start unit (inclusive).
    pub start: Unit,
    /// End unit (exclusive), `start + meeting duration`.
    pub end: Unit,
    /// Member ids per role name.
    pub members: BTreeMap<String, Vec<String>>,
}

/// A constraint violation found in a solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Related person id or role name.
    pub entity_id: String,
    /// Index of the offending cohort, when one applies.
    pub cohort_index: Option<usize>,
    /// Human-readable description.
    pub message: String,
}

/// Classification of solution violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// Member is not available for the full meeting.
    Unavailable,
    /// Role headcount in a cohort is outside `[min, max]`.
    RoleBounds,
    /// Person placed in more cohorts than their cap allows.
    CapExceeded,
    /// Person placed in two overlapping cohorts.
    DoubleBooked,
    /// Cohort references a person or role absent from the request.
    UnknownMember,
    /// Cohort length differs from the meeting duration.
    WrongDuration,
}

impl Cohort {
    /// Creates an empty cohort spanning `[start, start + length)`.
    pub fn new(start: Unit, length: Unit) -> Self {
        Self {
            start,
            end: start + length,
            members: BTreeMap::new(),
        }
    }

    /// Sets the members of a role.
    pub fn with_members(mut self, role: impl Into<String>, ids: Vec<String>) -> Self {
        self.members.insert(role.into(), ids);
        self
    }

    /// The meeting span.
    #[inline]
    pub fn interval(&self) -> Interval {
        Interval::new(self.start, self.end)
    }

    /// Member ids of a role (empty if the role is absent).
    pub fn members_of(&self, role: &str) -> &[String] {
        self.members.get(role).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of members across roles.
    pub fn size(&self) -> usize {
        self.members.values().map(Vec::len).sum()
    }

    /// Whether a person is a member, in any role.
    pub fn contains(&self, person_id: &str) -> bool {
        self.members
            .values()
            .any(|ids| ids.iter().any(|id| id == person_id))
    }

    /// Wall-clock start relative to an anchor Monday.
    pub fn start_datetime(&self, grid: &TimeGrid, anchor: DateTime<Utc>) -> DateTime<Utc> {
        grid.to_datetime(anchor, self.start)
    }

    /// Wall-clock end relative to an anchor Monday.
    pub fn end_datetime(&self, grid: &TimeGrid, anchor: DateTime<Utc>) -> DateTime<Utc> {
        grid.to_datetime(anchor, self.end)
    }
}

impl Violation {
    /// Creates a violation.
    pub fn new(
        violation_type: ViolationType,
        entity_id: impl Into<String>,
        cohort_index: Option<usize>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            violation_type,
            entity_id: entity_id.into(),
            cohort_index,
            message: message.into(),
        }
    }
}

impl ScheduleSolution {
    /// Creates an empty solution.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a list of cohorts.
    pub fn from_cohorts(cohorts: Vec<Cohort>) -> Self {
        Self { cohorts }
    }

    /// Adds a cohort.
    pub fn add_cohort(&mut self, cohort: Cohort) {
        self.cohorts.push(cohort);
    }

    /// Number of cohorts.
    pub fn len(&self) -> usize {
        self.cohorts.len()
    }

    /// Whether no cohort was formed.
    pub fn is_empty(&self) -> bool {
        self.cohorts.is_empty()
    }

    /// Iterates over the cohorts.
    pub fn iter(&self) -> std::slice::Iter<'_, Cohort> {
        self.cohorts.iter()
    }

    /// Cohorts containing a person.
    pub fn cohorts_for(&self, person_id: &str) -> Vec<&Cohort> {
        self.cohorts.iter().filter(|c| c.contains(person_id)).collect()
    }

    /// Number of cohorts a person appears in.
    pub fn assignment_count(&self, person_id: &str) -> usize {
        self.cohorts.iter().filter(|c| c.contains(person_id)).count()
    }

    /// Cohorts starting at a given unit.
    pub fn cohorts_at(&self, start: Unit) -> Vec<&Cohort> {
        self.cohorts.iter().filter(|c| c.start == start).collect()
    }
}

impl<'a> IntoIterator for &'a ScheduleSolution {
    type Item = &'a Cohort;
    type IntoIter = std::slice::Iter<'a, Cohort>;

    fn into_iter(self) -> Self::IntoIter {
        self.cohorts.iter()
    }
}
