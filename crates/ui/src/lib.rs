#![forbid(unsafe_code)]

pub mod vm;

pub use vm::{
    ProblemRowVm, StatusInfo, difficulty_bg_color, difficulty_color, format_date,
    format_datetime, map_problem_rows, status_info,
};
