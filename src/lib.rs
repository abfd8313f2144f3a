//! Cohort scheduling over weekly availability.
//!
//! Forms small groups (cohorts) of people from several roles, such as
//! participants and facilitators, at times everyone in the group can meet.
//! Each role has per-cohort bounds, each person an assignment cap. The
//! number of placements is maximised with an integer program.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Interval`, `Person`, `PersonType`,
//!   `SchedulingRequest`, `Cohort`, `ScheduleSolution`, `TimeGrid`
//! - **`algebra`**: Interval subtraction, flattening and overlap counting
//! - **`assembler`**: Raw person records to a validated request
//! - **`validation`**: Input integrity checks (duplicate roles, bounds, intervals)
//! - **`ilp`**: Integer program construction and solving
//! - **`decompose`**: Mega-group splitting into balanced cohorts
//! - **`verify`**: Availability verification and rule auditing
//! - **`scheduler`**: End-to-end pipeline and schedule report
//! - **`config`**: Solver configuration
//!
//! # Quick Start
//!
//! ```
//! use u_cohort::models::{Person, PersonType, SchedulingRequest};
//! use u_cohort::scheduler::{CohortScheduler, ScheduleReport};
//!
//! let request = SchedulingRequest::new(2)
//!     .with_role(
//!         PersonType::new("Participant", 1, 3)
//!             .with_person(Person::new("p1").with_availability(0, 6))
//!             .with_person(Person::new("p2").with_availability(4, 10)),
//!     )
//!     .with_role(
//!         PersonType::new("Facilitator", 1, 1)
//!             .with_person(Person::new("f1").with_availability(0, 10)),
//!     );
//!
//! if let Some(solution) = CohortScheduler::new().schedule(&request).unwrap() {
//!     let report = ScheduleReport::calculate(&request, &solution);
//!     assert!(report.verified);
//! }
//! ```
//!
//! # References
//!
//! - Wolsey (2020), "Integer Programming"
//! - Huangfu & Hall (2018), "Parallelizing the dual revised simplex method"

pub mod algebra;
pub mod assembler;
pub mod config;
pub mod decompose;
pub mod error;
pub mod ilp;
pub mod models;
pub mod scheduler;
pub mod validation;
pub mod verify;

pub use config::SolverConfig;
pub use error::CohortError;
