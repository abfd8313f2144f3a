//! Scheduling request model.

use serde::{Deserialize, Serialize};

use super::{Person, PersonType, Unit};

/// The complete input to one scheduling run.
///
/// Built by the input assembler (see [`crate::assembler`]) or directly by
/// the caller. All configuration the core needs is carried here or passed
/// explicitly next to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingRequest {
    /// Length of every meeting, in units.
    pub meeting_duration: Unit,
    /// Roles taking part, each with its pool of people.
    pub roles: Vec<PersonType>,
}

impl SchedulingRequest {
    /// Creates a request with no roles.
    pub fn new(meeting_duration: Unit) -> Self {
        Self {
            meeting_duration,
            roles: Vec::new(),
        }
    }

    /// Adds a role.
    pub fn with_role(mut self, role: PersonType) -> Self {
        self.roles.push(role);
        self
    }

    /// Finds a role by name.
    pub fn role(&self, name: &str) -> Option<&PersonType> {
        self.roles.iter().find(|r| r.name == name)
    }

    /// Finds a person of a given role.
    pub fn person(&self, role: &str, id: &str) -> Option<&Person> {
        self.role(role).and_then(|r| r.person(id))
    }

    /// Total number of people across all roles.
    pub fn person_count(&self) -> usize {
        self.roles.iter().map(|r| r.people.len()).sum()
    }

    /// Largest unit appearing in any availability interval.
    pub fn max_unit(&self) -> Unit {
        self.roles
            .iter()
            .flat_map(|r| r.people.iter())
            .map(Person::max_unit)
            .max()
            .unwrap_or(0)
    }
}
