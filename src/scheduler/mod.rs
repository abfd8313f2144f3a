//! Cohort scheduling pipeline and schedule reporting.
//!
//! # Algorithm
//!
//! `CohortScheduler` validates a request, builds and solves the integer
//! program, and decomposes each slot's mega-group into cohorts. The
//! result is optimal in the number of placements when the solver finishes
//! within its time limit, and the best incumbent otherwise.
//!
//! # Report
//!
//! `ScheduleReport` summarises a solution: cohorts formed, who was and was
//! not placed, capacity utilization, and verification status.

mod cohort;
mod report;

pub use cohort::CohortScheduler;
pub use report::{RoleReport, ScheduleReport};
