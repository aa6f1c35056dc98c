#![forbid(unsafe_code)]

pub mod eligibility;
pub mod model;
pub mod time;

pub use eligibility::{Ineligible, IneligibleKind, check_eligibility, should_problem_be_in_session};
pub use time::Clock;
