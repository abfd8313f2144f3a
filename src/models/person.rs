//! Person and role models.
//!
//! People are the entities grouped into cohorts. Each person belongs to
//! exactly one role ([`PersonType`]), e.g. participant or facilitator,
//! and carries a weekly availability and a cap on how many cohorts they
//! may join.

use serde::{Deserialize, Serialize};

use super::{Interval, Unit};

/// A person to be placed into cohorts.
///
/// Constructed fresh for each scheduling run and left untouched while
/// solving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Opaque identifier (e.g. the source record id).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Windows during which the person can meet.
    pub availability: Vec<Interval>,
    /// Maximum number of cohorts this person may join.
    pub max_assignments: u32,
}

/// A role with its own per-cohort size bounds and pool of people.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonType {
    /// Role name, unique within a request.
    pub name: String,
    /// Fewest people of this role per cohort.
    pub min_per_cohort: u32,
    /// Most people of this role per cohort.
    pub max_per_cohort: u32,
    /// People holding this role.
    pub people: Vec<Person>,
}

impl Person {
    /// Creates a person with no availability and a cap of one cohort.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            availability: Vec::new(),
            max_assignments: 1,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds an availability window.
    pub fn with_availability(mut self, start: Unit, end: Unit) -> Self {
        self.availability.push(Interval::new(start, end));
        self
    }

    /// Replaces all availability windows.
    pub fn with_intervals(mut self, intervals: Vec<Interval>) -> Self {
        self.availability = intervals;
        self
    }

    /// Sets the assignment cap.
    pub fn with_max_assignments(mut self, max_assignments: u32) -> Self {
        self.max_assignments = max_assignments;
        self
    }

    /// Whether a meeting of `length` units starting at `start` fits inside
    /// one of this person's availability windows.
    pub fn can_attend(&self, start: Unit, length: Unit) -> bool {
        self.availability.iter().any(|w| w.covers(start, length))
    }

    /// Latest unit mentioned in this person's availability.
    pub fn max_unit(&self) -> Unit {
        self.availability
            .iter()
            .map(|w| w.start.max(w.end))
            .max()
            .unwrap_or(0)
    }
}

impl PersonType {
    /// Creates a role with the given per-cohort bounds.
    pub fn new(name: impl Into<String>, min_per_cohort: u32, max_per_cohort: u32) -> Self {
        Self {
            name: name.into(),
            min_per_cohort,
            max_per_cohort,
            people: Vec::new(),
        }
    }

    /// Adds a person.
    pub fn with_person(mut self, person: Person) -> Self {
        self.people.push(person);
        self
    }

    /// Adds several people.
    pub fn with_people(mut self, people: impl IntoIterator<Item = Person>) -> Self {
        self.people.extend(people);
        self
    }

    /// Finds a person by id.
    pub fn person(&self, id: &str) -> Option<&Person> {
        self.people.iter().find(|p| p.id == id)
    }

    /// Whether `count` people of this role make a valid cohort.
    #[inline]
    pub fn accepts(&self, count: usize) -> bool {
        (self.min_per_cohort as usize..=self.max_per_cohort as usize).contains(&count)
    }
}
