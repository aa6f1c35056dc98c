use serde::Serialize;

use revise_core::model::Problem;

use crate::vm::difficulty_fmt::{difficulty_bg_color, difficulty_color};
use crate::vm::status_fmt::{StatusInfo, status_info};
use crate::vm::time_fmt::{UNKNOWN_DATE, format_datetime};

/// UI-ready row for a problem list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProblemRowVm {
    pub id: String,
    pub difficulty: &'static str,
    pub difficulty_class: &'static str,
    pub difficulty_bg_class: &'static str,
    pub status: StatusInfo,
    pub next_revision: String,
    pub archived: bool,
    pub tags: Vec<String>,
    pub companies: Vec<String>,
}

impl From<&Problem> for ProblemRowVm {
    fn from(problem: &Problem) -> Self {
        let difficulty = problem.difficulty().as_str();
        Self {
            id: problem.id().to_string(),
            difficulty,
            difficulty_class: difficulty_color(Some(difficulty)),
            difficulty_bg_class: difficulty_bg_color(Some(difficulty)),
            status: status_info(Some(problem.status().as_str())),
            next_revision: problem
                .next_revision_at()
                .map_or_else(|| UNKNOWN_DATE.to_string(), format_datetime),
            archived: problem.is_archived(),
            tags: problem.tags().iter().map(ToString::to_string).collect(),
            companies: problem.company_tags().iter().map(ToString::to_string).collect(),
        }
    }
}

#[must_use]
pub fn map_problem_rows(problems: &[Problem]) -> Vec<ProblemRowVm> {
    problems.iter().map(ProblemRowVm::from).collect()
}
