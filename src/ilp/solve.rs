//! Solver invocation.
//!
//! Hands a [`CohortModel`] to HiGHS with a roster-scaled time limit and
//! reads back the assignment. Any solver failure is reported as `None`:
//! not finding a schedule is an expected outcome, never a fault.

use std::collections::BTreeMap;
use std::time::Instant;

use good_lp::solvers::highs::highs;
use good_lp::{ResolutionError, Solution, SolverModel};
use tracing::{debug, info, warn};

use super::{AssignmentKey, CohortModel};
use crate::config::SolverConfig;
use crate::models::Unit;

const INTEGRALITY_TOLERANCE: f64 = 1e-6;

/// Raw solver output: the mega-group at every slot, before decomposition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolvedModel {
    /// Decision variables set to 1, in role/person/time order.
    pub assigned: Vec<AssignmentKey>,
    /// Solved group count per slot.
    pub group_counts: BTreeMap<Unit, u32>,
}

impl SolvedModel {
    /// Whether nobody was assigned.
    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }

    /// Group count at a slot (0 for slots without a variable).
    pub fn group_count(&self, time: Unit) -> u32 {
        self.group_counts.get(&time).copied().unwrap_or(0)
    }
}

/// Solves a cohort model.
///
/// `people` is the roster size used to scale the time limit.
///
/// Returns `None` when the solver reports infeasibility, fails, or stops
/// without a usable integral incumbent.
pub fn solve_model(model: CohortModel, config: &SolverConfig, people: usize) -> Option<SolvedModel> {
    if model.assignments.is_empty() {
        debug!("no person fits any start time, skipping solver");
        return Some(SolvedModel::default());
    }

    let stats = model.stats();
    let time_limit = config.time_limit_for(people);
    info!(
        assignment_vars = stats.assignment_vars,
        group_count_vars = stats.group_count_vars,
        constraints = stats.constraints,
        time_limit_secs = time_limit,
        "solving cohort model"
    );

    let CohortModel {
        variables,
        objective,
        constraints,
        assignments,
        group_counts,
    } = model;

    let mut problem = variables
        .maximise(objective)
        .using(highs)
        .set_option("time_limit", time_limit)
        .set_option("random_seed", config.random_seed)
        .set_option("log_to_console", config.solver_log);
    if let Some(threads) = config.threads {
        problem = problem.set_option("threads", i32::try_from(threads).unwrap_or(i32::MAX));
    }
    for c in constraints {
        problem.add_constraint(c);
    }

    let started = Instant::now();
    let solution = match problem.solve() {
        Ok(solution) => solution,
        Err(ResolutionError::Infeasible) => {
            info!("cohort model is infeasible");
            return None;
        }
        Err(e) => {
            warn!(error = %e, "solver failed, reporting no solution");
            return None;
        }
    };
    let elapsed = started.elapsed();

    let mut assigned = Vec::new();
    for (key, var) in &assignments {
        let value = solution.value(*var);
        if !is_integral(value) {
            warn!(?key, value, "non-integral assignment, reporting no solution");
            return None;
        }
        if value > 0.5 {
            assigned.push(*key);
        }
    }

    let mut counts = BTreeMap::new();
    for (&t, var) in &group_counts {
        let value = solution.value(*var);
        if !is_integral(value) || value < -INTEGRALITY_TOLERANCE {
            warn!(time = t, value, "non-integral group count, reporting no solution");
            return None;
        }
        let count = value.round() as u32;
        if count > 0 {
            counts.insert(t, count);
        }
    }

    info!(
        elapsed_ms = elapsed.as_millis() as u64,
        assigned = assigned.len(),
        slots = counts.len(),
        "solver finished"
    );
    Some(SolvedModel {
        assigned,
        group_counts: counts,
    })
}

fn is_integral(value: f64) -> bool {
    value.is_finite() && (value - value.round()).abs() <= INTEGRALITY_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ilp::CohortModelBuilder;
    use crate::models::{Person, PersonType, SchedulingRequest};

    fn fast_config() -> SolverConfig {
        SolverConfig::new().with_time_limits(5.0, 10.0).with_threads(1)
    }

    #[test]
    fn test_solve_simple_pair() {
        let request = SchedulingRequest::new(2).with_role(
            PersonType::new("Participant", 1, 2)
                .with_person(Person::new("p1").with_availability(0, 4))
                .with_person(Person::new("p2").with_availability(0, 4)),
        );
        let model = CohortModelBuilder::new(&request).build();
        let solved = solve_model(model, &fast_config(), request.person_count()).unwrap();

        assert_eq!(solved.assigned.len(), 2);
        for key in &solved.assigned {
            assert!(solved.group_count(key.time) >= 1);
            assert!(key.time <= 2);
        }
    }

    #[test]
    fn test_solve_respects_cap() {
        let request = SchedulingRequest::new(1).with_role(
            PersonType::new("Participant", 1, 1).with_person(
                Person::new("p1")
                    .with_availability(0, 10)
                    .with_max_assignments(3),
            ),
        );
        let model = CohortModelBuilder::new(&request).build();
        let solved = solve_model(model, &fast_config(), 1).unwrap();

        assert_eq!(solved.assigned.len(), 3);
    }

    #[test]
    fn test_solve_non_overlap() {
        // cap allows two meetings but the window only fits two disjoint ones
        let request = SchedulingRequest::new(2).with_role(
            PersonType::new("Participant", 1, 1).with_person(
                Person::new("p1")
                    .with_availability(0, 5)
                    .with_max_assignments(5),
            ),
        );
        let model = CohortModelBuilder::new(&request).build();
        let solved = solve_model(model, &fast_config(), 1).unwrap();

        assert_eq!(solved.assigned.len(), 2);
        let times: Vec<Unit> = solved.assigned.iter().map(|k| k.time).collect();
        assert!(times[1] >= times[0] + 2);
    }

    #[test]
    fn test_solve_empty_model() {
        let request = SchedulingRequest::new(2)
            .with_role(PersonType::new("Participant", 1, 2).with_person(Person::new("p1")));
        let model = CohortModelBuilder::new(&request).build();
        let solved = solve_model(model, &fast_config(), 1).unwrap();
        assert!(solved.is_empty());
        assert_eq!(solved.group_count(0), 0);
    }

    #[test]
    fn test_is_integral() {
        assert!(is_integral(1.0));
        assert!(is_integral(2.0 + 1e-9));
        assert!(!is_integral(0.5));
        assert!(!is_integral(f64::NAN));
    }
}
