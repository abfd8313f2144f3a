//! Solution verification.
//!
//! Independent, read-only checks of a [`ScheduleSolution`] against the
//! request it was produced from. Nothing here trusts the solver.
//!
//! - [`verify`]: every member is available for the whole meeting.
//! - [`audit`]: every rule, reported as a list of [`Violation`]s.

use std::collections::HashMap;

use crate::models::{ScheduleSolution, SchedulingRequest, Violation, ViolationType};

/// Whether every cohort member is available for the full meeting.
///
/// A member missing from the request counts as unavailable.
pub fn verify(request: &SchedulingRequest, solution: &ScheduleSolution) -> bool {
    solution.iter().all(|cohort| {
        cohort.members.iter().all(|(role, ids)| {
            ids.iter().all(|id| {
                request
                    .person(role, id)
                    .is_some_and(|p| p.can_attend(cohort.start, request.meeting_duration))
            })
        })
    })
}

/// Checks a solution against every scheduling rule.
///
/// Checks:
/// 1. Every cohort spans exactly the meeting duration
/// 2. Every member exists in the request under the given role
/// 3. Every member is available for the whole meeting
/// 4. Every role's headcount per cohort lies within `[min, max]`
/// 5. Nobody joins more cohorts than their cap
/// 6. Nobody joins two overlapping cohorts
///
/// # Returns
/// All detected violations; empty when the solution is valid.
pub fn audit(request: &SchedulingRequest, solution: &ScheduleSolution) -> Vec<Violation> {
    let mut violations = Vec::new();
    let duration = request.meeting_duration;

    for (i, cohort) in solution.iter().enumerate() {
        if cohort.end != cohort.start + duration {
            violations.push(Violation::new(
                ViolationType::WrongDuration,
                format!("cohort-{i}"),
                Some(i),
                format!(
                    "Cohort spans {} but meetings last {duration} units",
                    cohort.interval()
                ),
            ));
        }

        for (role_name, ids) in &cohort.members {
            let Some(role) = request.role(role_name) else {
                violations.push(Violation::new(
                    ViolationType::UnknownMember,
                    role_name.clone(),
                    Some(i),
                    format!("Cohort references unknown role '{role_name}'"),
                ));
                continue;
            };

            for id in ids {
                match role.person(id) {
                    None => violations.push(Violation::new(
                        ViolationType::UnknownMember,
                        id.clone(),
                        Some(i),
                        format!("Cohort references unknown {role_name} '{id}'"),
                    )),
                    Some(person) if !person.can_attend(cohort.start, duration) => {
                        violations.push(Violation::new(
                            ViolationType::Unavailable,
                            id.clone(),
                            Some(i),
                            format!("{role_name} '{id}' is not available for {}", cohort.interval()),
                        ))
                    }
                    Some(_) => {}
                }
            }
        }

        for role in &request.roles {
            let count = cohort.members_of(&role.name).len();
            if !role.accepts(count) {
                violations.push(Violation::new(
                    ViolationType::RoleBounds,
                    role.name.clone(),
                    Some(i),
                    format!(
                        "Cohort has {count} {} (allowed {}..={})",
                        role.name, role.min_per_cohort, role.max_per_cohort
                    ),
                ));
            }
        }
    }

    // (role, person) -> cohort indices
    let mut memberships: HashMap<(&str, &str), Vec<usize>> = HashMap::new();
    for (i, cohort) in solution.iter().enumerate() {
        for (role, ids) in &cohort.members {
            for id in ids {
                memberships.entry((role.as_str(), id.as_str())).or_default().push(i);
            }
        }
    }

    let mut keys: Vec<_> = memberships.keys().copied().collect();
    keys.sort_unstable();
    for (role, id) in keys {
        let indices = &memberships[&(role, id)];

        if let Some(person) = request.person(role, id) {
            if indices.len() > person.max_assignments as usize {
                violations.push(Violation::new(
                    ViolationType::CapExceeded,
                    id,
                    None,
                    format!(
                        "{role} '{id}' joins {} cohorts (cap {})",
                        indices.len(),
                        person.max_assignments
                    ),
                ));
            }
        }

        for (a, &i) in indices.iter().enumerate() {
            for &j in &indices[a + 1..] {
                let (x, y) = (&solution.cohorts[i], &solution.cohorts[j]);
                if x.interval().overlaps(&y.interval()) {
                    violations.push(Violation::new(
                        ViolationType::DoubleBooked,
                        id,
                        Some(j),
                        format!("{role} '{id}' is in overlapping cohorts {i} and {j}"),
                    ));
                }
            }
        }
    }

    violations
}
