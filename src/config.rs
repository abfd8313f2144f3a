//! Solver configuration.
//!
//! The wall-clock budget scales with roster size: `people * secs_per_person`,
//! clamped to `[min_time_limit_secs, max_time_limit_secs]`. Small rosters
//! get a short (often exact) solve; large ones are bounded by the ceiling.

use serde::{Deserialize, Serialize};

/// Settings for one solver invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Time limit floor (seconds).
    pub min_time_limit_secs: f64,
    /// Time limit ceiling (seconds).
    pub max_time_limit_secs: f64,
    /// Budget added per person (seconds).
    pub secs_per_person: f64,
    /// Solver worker threads. `None` = solver default.
    pub threads: Option<u32>,
    /// Random seed passed to the solver.
    pub random_seed: i32,
    /// Forward the solver's own console output.
    pub solver_log: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            min_time_limit_secs: 5.0,
            max_time_limit_secs: 60.0,
            secs_per_person: 0.5,
            threads: None,
            random_seed: 0,
            solver_log: false,
        }
    }
}

impl SolverConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the time limit floor and ceiling.
    pub fn with_time_limits(mut self, min_secs: f64, max_secs: f64) -> Self {
        self.min_time_limit_secs = min_secs;
        self.max_time_limit_secs = max_secs;
        self
    }

    /// Sets the per-person budget.
    pub fn with_secs_per_person(mut self, secs: f64) -> Self {
        self.secs_per_person = secs;
        self
    }

    /// Sets the thread count.
    pub fn with_threads(mut self, threads: u32) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: i32) -> Self {
        self.random_seed = seed;
        self
    }

    /// Enables or disables solver console output.
    pub fn with_solver_log(mut self, enabled: bool) -> Self {
        self.solver_log = enabled;
        self
    }

    /// Time limit for a roster of `people` (seconds).
    pub fn time_limit_for(&self, people: usize) -> f64 {
        let floor = self.min_time_limit_secs.max(0.0);
        let ceiling = self.max_time_limit_secs.max(floor);
        (people as f64 * self.secs_per_person).clamp(floor, ceiling)
    }
}
