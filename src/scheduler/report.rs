//! Schedule summary metrics.
//!
//! Summarises a solution against its request, for display next to the
//! cohorts themselves.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Cohort count | Number of cohorts formed |
//! | Assigned / unassigned | People in at least one cohort, per role |
//! | Avg cohort size | Mean members of a role per cohort |
//! | Utilization | Assignments / total assignment caps |
//! | Verified | Every member available for the full meeting |

use serde::Serialize;

use crate::models::{ScheduleSolution, SchedulingRequest};
use crate::verify::{audit, verify};

/// Summary of a schedule.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleReport {
    /// Number of cohorts.
    pub cohort_count: usize,
    /// Per-role breakdown, in request order.
    pub roles: Vec<RoleReport>,
    /// Fraction of total assignment capacity used (0.0..1.0).
    pub utilization: f64,
    /// Availability check passed.
    pub verified: bool,
    /// Number of rule violations found by [`audit`].
    pub violation_count: usize,
}

/// Per-role breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct RoleReport {
    /// Role name.
    pub name: String,
    /// Ids of people placed in at least one cohort.
    pub assigned: Vec<String>,
    /// Ids of people placed in no cohort.
    pub unassigned: Vec<String>,
    /// Total cohort memberships.
    pub assignments: usize,
    /// Mean members of this role per cohort.
    pub avg_cohort_size: f64,
}

impl ScheduleReport {
    /// Computes the report for a solution.
    pub fn calculate(request: &SchedulingRequest, solution: &ScheduleSolution) -> Self {
        let cohort_count = solution.len();
        let mut total_assignments = 0usize;
        let mut total_capacity = 0usize;

        let roles = request
            .roles
            .iter()
            .map(|role| {
                let mut assigned = Vec::new();
                let mut unassigned = Vec::new();
                for person in &role.people {
                    total_capacity += person.max_assignments as usize;
                    let in_role = solution
                        .iter()
                        .any(|c| c.members_of(&role.name).contains(&person.id));
                    if in_role {
                        assigned.push(person.id.clone());
                    } else {
                        unassigned.push(person.id.clone());
                    }
                }

                let assignments: usize = solution.iter().map(|c| c.members_of(&role.name).len()).sum();
                total_assignments += assignments;

                let avg_cohort_size = if cohort_count == 0 {
                    0.0
                } else {
                    assignments as f64 / cohort_count as f64
                };

                RoleReport {
                    name: role.name.clone(),
                    assigned,
                    unassigned,
                    assignments,
                    avg_cohort_size,
                }
            })
            .collect();

        let utilization = if total_capacity == 0 {
            0.0
        } else {
            total_assignments as f64 / total_capacity as f64
        };

        Self {
            cohort_count,
            roles,
            utilization,
            verified: verify(request, solution),
            violation_count: audit(request, solution).len(),
        }
    }

    /// Whether everyone was placed in at least one cohort.
    pub fn is_complete(&self) -> bool {
        self.roles.iter().all(|r| r.unassigned.is_empty())
    }

    /// Per-role breakdown by name.
    pub fn role(&self, name: &str) -> Option<&RoleReport> {
        self.roles.iter().find(|r| r.name == name)
    }
}
