mod difficulty_fmt;
mod problem_vm;
mod status_fmt;
mod time_fmt;

pub use difficulty_fmt::{difficulty_bg_color, difficulty_color};
pub use problem_vm::{ProblemRowVm, map_problem_rows};
pub use status_fmt::{StatusInfo, status_info};
pub use time_fmt::{INVALID_DATE, UNKNOWN_DATE, format_date, format_datetime};
