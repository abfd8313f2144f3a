//! ILP-backed cohort scheduler.
//!
//! # Algorithm
//!
//! 1. Validate the request (fails fast on configuration errors).
//! 2. Build the integer program (see [`crate::ilp`]).
//! 3. Solve with a roster-scaled time limit.
//! 4. Split each slot's mega-group into cohorts (see [`crate::decompose`]).
//!
//! The scheduler holds configuration only. Every call builds its own model,
//! so separate requests never share state.

use crate::config::SolverConfig;
use crate::decompose::decompose;
use crate::error::CohortError;
use crate::ilp::{solve_model, CohortModelBuilder};
use crate::models::{ScheduleSolution, SchedulingRequest};
use crate::validation::validate_request;

/// Cohort scheduler.
///
/// # Example
///
/// ```
/// use u_cohort::models::{Person, PersonType, SchedulingRequest};
/// use u_cohort::scheduler::CohortScheduler;
/// use u_cohort::verify::verify;
///
/// let request = SchedulingRequest::new(2)
///     .with_role(
///         PersonType::new("Participant", 2, 4)
///             .with_person(Person::new("p1").with_availability(0, 10))
///             .with_person(Person::new("p2").with_availability(0, 10)),
///     )
///     .with_role(
///         PersonType::new("Facilitator", 1, 1)
///             .with_person(Person::new("f1").with_availability(0, 10)),
///     );
///
/// let solution = CohortScheduler::new().schedule(&request).unwrap().unwrap();
/// assert_eq!(solution.len(), 1);
/// assert!(verify(&request, &solution));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CohortScheduler {
    config: SolverConfig,
}

impl CohortScheduler {
    /// Creates a scheduler with the default solver configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scheduler with the given solver configuration.
    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Schedules a request.
    ///
    /// # Returns
    /// - `Ok(Some(solution))` with at least one cohort
    /// - `Ok(None)` when no cohort can be formed or the solver gave up
    ///
    /// # Errors
    /// [`CohortError::InvalidRequest`] if the request fails validation.
    pub fn schedule(
        &self,
        request: &SchedulingRequest,
    ) -> Result<Option<ScheduleSolution>, CohortError> {
        validate_request(request).map_err(CohortError::InvalidRequest)?;

        let model = CohortModelBuilder::new(request).build();
        let Some(solved) = solve_model(model, &self.config, request.person_count()) else {
            return Ok(None);
        };

        let solution = decompose(request, &solved);
        if solution.is_empty() {
            tracing::info!("no cohort could be formed");
            return Ok(None);
        }
        Ok(Some(solution))
    }
}
