//! Decides whether a candidate problem may join a revision session.
//!
//! Rules run in a fixed order and the first failing one wins:
//!
//! 1. problem and settings must be present
//! 2. the problem is not already in the session
//! 3. the problem is neither archived nor mastered
//! 4. the next revision is not scheduled after `now`
//! 5. the session has room left for the problem's difficulty
//! 6. the problem matches the configured revision mode filters

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{Difficulty, Problem, RevisionMode, RevisionSession, RevisionSettings};

/// Reason a problem was kept out of a session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Ineligible {
    #[error("problem or settings missing")]
    MissingInput,

    #[error("problem is already in the session")]
    AlreadyInSession,

    #[error("problem is archived")]
    Archived,

    #[error("problem is mastered")]
    Mastered,

    #[error("next revision is scheduled for {next_revision_at}")]
    NotDue { next_revision_at: DateTime<Utc> },

    #[error("session already holds {count} {difficulty} problem(s), target is {target}")]
    DifficultyQuotaReached {
        difficulty: Difficulty,
        count: u32,
        target: u32,
    },

    #[error("problem tags do not match the revision topics")]
    TopicMismatch,

    #[error("problem companies do not match the revision companies")]
    CompanyMismatch,
}

/// Field-less discriminant of [`Ineligible`], usable as a tally key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IneligibleKind {
    MissingInput,
    AlreadyInSession,
    Archived,
    Mastered,
    NotDue,
    DifficultyQuotaReached,
    TopicMismatch,
    CompanyMismatch,
}

impl Ineligible {
    #[must_use]
    pub fn kind(&self) -> IneligibleKind {
        match self {
            Ineligible::MissingInput => IneligibleKind::MissingInput,
            Ineligible::AlreadyInSession => IneligibleKind::AlreadyInSession,
            Ineligible::Archived => IneligibleKind::Archived,
            Ineligible::Mastered => IneligibleKind::Mastered,
            Ineligible::NotDue { .. } => IneligibleKind::NotDue,
            Ineligible::DifficultyQuotaReached { .. } => IneligibleKind::DifficultyQuotaReached,
            Ineligible::TopicMismatch => IneligibleKind::TopicMismatch,
            Ineligible::CompanyMismatch => IneligibleKind::CompanyMismatch,
        }
    }
}

/// Returns true when `problem` should be added to `session`.
#[must_use]
pub fn should_problem_be_in_session(
    problem: Option<&Problem>,
    settings: Option<&RevisionSettings>,
    session: Option<&RevisionSession>,
    now: DateTime<Utc>,
) -> bool {
    check_eligibility(problem, settings, session, now).is_ok()
}

/// Same rules as [`should_problem_be_in_session`], reporting the first
/// rule that rejected the problem.
///
/// # Errors
///
/// Returns the [`Ineligible`] reason of the first failing rule.
pub fn check_eligibility(
    problem: Option<&Problem>,
    settings: Option<&RevisionSettings>,
    session: Option<&RevisionSession>,
    now: DateTime<Utc>,
) -> Result<(), Ineligible> {
    let (Some(problem), Some(settings)) = (problem, settings) else {
        return Err(Ineligible::MissingInput);
    };

    let result = evaluate(problem, settings, session, now);
    if let Err(reason) = &result {
        tracing::debug!(problem = %problem.id(), %reason, "problem not eligible for session");
    }
    result
}

fn evaluate(
    problem: &Problem,
    settings: &RevisionSettings,
    session: Option<&RevisionSession>,
    now: DateTime<Utc>,
) -> Result<(), Ineligible> {
    if session.is_some_and(|s| s.contains(problem.id())) {
        return Err(Ineligible::AlreadyInSession);
    }

    if problem.is_archived() {
        return Err(Ineligible::Archived);
    }
    if problem.is_mastered() {
        return Err(Ineligible::Mastered);
    }

    if let Some(next_revision_at) = problem
        .next_revision_at()
        .filter(|_| !problem.is_due_at(now))
    {
        return Err(Ineligible::NotDue { next_revision_at });
    }

    if let Some(session) = session {
        let difficulty = problem.difficulty();
        let count = session.difficulty_counts().count(difficulty);
        let target = settings.difficulty_distribution().target(difficulty);
        if count >= target {
            return Err(Ineligible::DifficultyQuotaReached {
                difficulty,
                count,
                target,
            });
        }
    }

    check_revision_mode(problem, settings)
}

// Each filter only applies when its list is non-empty, COMBO included.
fn check_revision_mode(problem: &Problem, settings: &RevisionSettings) -> Result<(), Ineligible> {
    let mode = settings.revision_mode();
    let wants_topics = matches!(mode, RevisionMode::Topic | RevisionMode::Combo);
    let wants_companies = matches!(mode, RevisionMode::Company | RevisionMode::Combo);

    if wants_topics {
        if let Some(topics) = settings.topic_filter() {
            if !problem.has_any_tag(topics) {
                return Err(Ineligible::TopicMismatch);
            }
        }
    }

    if wants_companies {
        if let Some(companies) = settings.company_filter() {
            if !problem.has_any_company(companies) {
                return Err(Ineligible::CompanyMismatch);
            }
        }
    }

    Ok(())
}
