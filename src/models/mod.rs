//! Cohort scheduling domain models.
//!
//! Provides the core data types for describing a cohort scheduling
//! problem and its solution.
//!
//! # Domain Mappings
//!
//! | u-cohort | Course | Clinic | Tutoring |
//! |----------|--------|--------|----------|
//! | PersonType | Participant/Facilitator | Patient/Therapist | Student/Tutor |
//! | Person | Learner | Patient | Student |
//! | Cohort | Discussion group | Group session | Tutorial |
//! | ScheduleSolution | Term timetable | Weekly plan | Weekly plan |

mod interval;
mod person;
mod request;
mod solution;
mod time;

pub use interval::{Interval, Unit};
pub use person::{Person, PersonType};
pub use request::SchedulingRequest;
pub use solution::{Cohort, ScheduleSolution, Violation, ViolationType};
pub use time::{clamp_to_week, this_monday, TimeGrid, WeeklyTime, MINUTES_PER_WEEK};
