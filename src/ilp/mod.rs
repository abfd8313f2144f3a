//! Integer-programming formulation of cohort scheduling.
//!
//! Translates a [`SchedulingRequest`] into a binary integer program and
//! solves it with HiGHS through `good_lp`.
//!
//! # Formulation
//!
//! - `x[r, p, t]` (binary): person `p` of role `r` starts a meeting at unit `t`.
//!   Only created when the whole meeting `[t, t + d)` fits inside one of
//!   the person's availability windows; every other triple is fixed to 0.
//! - `g[t]` (integer >= 0): number of cohorts formed at unit `t`.
//!
//! Constraints:
//! 1. Non-overlap: for each person and start `t`, `sum x[r, p, t..t+d) <= 1`
//! 2. Assignment cap: for each person, `sum_t x[r, p, t] <= cap(p)`
//! 3. Role bounds: for each role and `t`, `min_r * g[t] <= sum_p x[r, p, t] <= max_r * g[t]`
//! 4. `g[t] <= sum_{r,p} x[r, p, t]`, so no cohort is formed without members
//!
//! Objective: maximise `sum x`.

mod solve;

pub use solve::{solve_model, SolvedModel};

use std::collections::BTreeMap;

use good_lp::{constraint, variable, Constraint, Expression, ProblemVariables, Variable};

use crate::models::{SchedulingRequest, Unit};

/// Typed identity of one decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssignmentKey {
    /// Index into `request.roles`.
    pub role: usize,
    /// Index into `request.roles[role].people`.
    pub person: usize,
    /// Meeting start unit.
    pub time: Unit,
}

/// Size of a built model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelStats {
    /// Binary assignment variables.
    pub assignment_vars: usize,
    /// Integer group-count variables.
    pub group_count_vars: usize,
    /// Linear constraints.
    pub constraints: usize,
}

/// A built, unsolved cohort model.
pub struct CohortModel {
    variables: ProblemVariables,
    objective: Expression,
    constraints: Vec<Constraint>,
    /// Index table in `AssignmentKey` order.
    assignments: Vec<(AssignmentKey, Variable)>,
    group_counts: BTreeMap<Unit, Variable>,
}

impl CohortModel {
    /// Model size.
    pub fn stats(&self) -> ModelStats {
        ModelStats {
            assignment_vars: self.assignments.len(),
            group_count_vars: self.group_counts.len(),
            constraints: self.constraints.len(),
        }
    }

    /// Whether a person may start a meeting at a unit.
    pub fn allows(&self, key: AssignmentKey) -> bool {
        self.assignments
            .binary_search_by_key(&key, |(k, _)| *k)
            .is_ok()
    }

    /// Decision-variable keys, in role/person/time order.
    pub fn assignment_keys(&self) -> impl Iterator<Item = &AssignmentKey> {
        self.assignments.iter().map(|(k, _)| k)
    }

    /// Units carrying a group-count variable.
    pub fn slots(&self) -> impl Iterator<Item = Unit> + '_ {
        self.group_counts.keys().copied()
    }
}

/// Builds a [`CohortModel`] from a scheduling request.
///
/// # Example
/// ```
/// use u_cohort::ilp::CohortModelBuilder;
/// use u_cohort::models::{Person, PersonType, SchedulingRequest};
///
/// let request = SchedulingRequest::new(2).with_role(
///     PersonType::new("Participant", 1, 4)
///         .with_person(Person::new("p1").with_availability(0, 10)),
/// );
/// let model = CohortModelBuilder::new(&request).build();
/// assert_eq!(model.stats().assignment_vars, 9);
/// ```
pub struct CohortModelBuilder<'a> {
    request: &'a SchedulingRequest,
}

impl<'a> CohortModelBuilder<'a> {
    /// Creates a builder. The request should already be validated.
    pub fn new(request: &'a SchedulingRequest) -> Self {
        Self { request }
    }

    /// Builds the model.
    ///
    /// Candidate start units range over `0..max_unit`, where `max_unit` is
    /// the largest unit in any availability. A start at `max_unit` itself
    /// can never fit a positive-length meeting.
    pub fn build(&self) -> CohortModel {
        let roles = &self.request.roles;
        let duration = self.request.meeting_duration;
        let horizon = self.request.max_unit();

        let mut variables = ProblemVariables::new();
        let mut constraints = Vec::new();
        let mut assignments = Vec::new();
        // start unit -> per-role assignment variables
        let mut slots: BTreeMap<Unit, Vec<Vec<Variable>>> = BTreeMap::new();

        for (r, role) in roles.iter().enumerate() {
            for (p, person) in role.people.iter().enumerate() {
                let starts: Vec<(Unit, Variable)> = (0..horizon)
                    .filter(|&t| person.can_attend(t, duration))
                    .map(|t| (t, variables.add(variable().binary())))
                    .collect();

                // Windows starting at a unit without a variable are covered
                // by the window of the next start.
                for (i, &(t, _)) in starts.iter().enumerate() {
                    let window: Vec<Variable> = starts[i..]
                        .iter()
                        .take_while(|(s, _)| *s < t + duration)
                        .map(|(_, v)| *v)
                        .collect();
                    if window.len() > 1 {
                        let busy: Expression = window.into_iter().sum();
                        constraints.push(constraint!(busy <= 1));
                    }
                }

                if starts.len() > person.max_assignments as usize {
                    let total: Expression = starts.iter().map(|(_, v)| *v).sum();
                    constraints.push(constraint!(total <= f64::from(person.max_assignments)));
                }

                for &(t, var) in &starts {
                    slots
                        .entry(t)
                        .or_insert_with(|| vec![Vec::new(); roles.len()])[r]
                        .push(var);
                    assignments.push((AssignmentKey { role: r, person: p, time: t }, var));
                }
            }
        }

        let mut group_counts = BTreeMap::new();
        for (&t, per_role) in &slots {
            let groups = variables.add(variable().integer().min(0));

            for (role, vars) in roles.iter().zip(per_role) {
                let headcount: Expression = vars.iter().copied().sum();
                let max = f64::from(role.max_per_cohort);
                let min = f64::from(role.min_per_cohort);
                constraints.push(constraint!(headcount.clone() <= max * groups));
                constraints.push(constraint!(headcount >= min * groups));
            }

            let everyone: Expression = per_role.iter().flatten().copied().sum();
            constraints.push(constraint!(groups <= everyone));
            group_counts.insert(t, groups);
        }

        let objective: Expression = assignments.iter().map(|(_, v)| *v).sum();

        let model = CohortModel {
            variables,
            objective,
            constraints,
            assignments,
            group_counts,
        };
        let stats = model.stats();
        tracing::debug!(
            assignment_vars = stats.assignment_vars,
            group_count_vars = stats.group_count_vars,
            constraints = stats.constraints,
            horizon,
            "built cohort model"
        );
        model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Person, PersonType};

    fn single_person_request(cap: u32) -> SchedulingRequest {
        SchedulingRequest::new(2).with_role(
            PersonType::new("Participant", 1, 3).with_person(
                Person::new("p1")
                    .with_availability(0, 4)
                    .with_max_assignments(cap),
            ),
        )
    }

    #[test]
    fn test_build_counts() {
        let model = CohortModelBuilder::new(&single_person_request(1)).build();
        let stats = model.stats();

        // starts 0, 1, 2 fit [0, 4) with duration 2
        assert_eq!(stats.assignment_vars, 3);
        assert_eq!(stats.group_count_vars, 3);
        // 2 non-overlap + 1 cap + 3 slots * (2 bounds + 1 group link)
        assert_eq!(stats.constraints, 12);
    }

    #[test]
    fn test_cap_constraint_skipped_when_slack() {
        let model = CohortModelBuilder::new(&single_person_request(5)).build();
        assert_eq!(model.stats().constraints, 11);
    }

    #[test]
    fn test_availability_bounds() {
        let request = SchedulingRequest::new(2).with_role(
            PersonType::new("Participant", 1, 3)
                .with_person(Person::new("p1").with_availability(0, 3).with_availability(6, 8))
                .with_person(Person::new("p2")),
        );
        let model = CohortModelBuilder::new(&request).build();

        let key = |person, time| AssignmentKey { role: 0, person, time };
        assert!(model.allows(key(0, 0)));
        assert!(model.allows(key(0, 1)));
        assert!(!model.allows(key(0, 2))); // [2, 4) leaves the first window
        assert!(!model.allows(key(0, 5)));
        assert!(model.allows(key(0, 6)));
        assert!(!model.allows(key(0, 7)));
        // no availability: no variables at all
        assert!(model.assignment_keys().all(|k| k.person == 0));
        assert_eq!(model.slots().collect::<Vec<_>>(), vec![0, 1, 6]);
    }

    #[test]
    fn test_keys_are_sorted() {
        let request = SchedulingRequest::new(1)
            .with_role(
                PersonType::new("A", 1, 2)
                    .with_person(Person::new("a1").with_availability(2, 5))
                    .with_person(Person::new("a2").with_availability(0, 3)),
            )
            .with_role(
                PersonType::new("B", 1, 1).with_person(Person::new("b1").with_availability(1, 4)),
            );
        let model = CohortModelBuilder::new(&request).build();

        let keys: Vec<AssignmentKey> = model.assignment_keys().copied().collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert_eq!(keys.len(), 3 + 3 + 3);
    }

    #[test]
    fn test_empty_request() {
        let model = CohortModelBuilder::new(&SchedulingRequest::new(2)).build();
        let stats = model.stats();
        assert_eq!(stats.assignment_vars, 0);
        assert_eq!(stats.group_count_vars, 0);
        assert_eq!(stats.constraints, 0);
    }
}
