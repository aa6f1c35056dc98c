use rand::rng;
use rand::seq::SliceRandom;
use std::collections::BTreeMap;

use revise_core::model::{Problem, RevisionSession, RevisionSettings, SessionEntry};
use revise_core::{Clock, IneligibleKind, check_eligibility};

use crate::error::SessionError;

/// Selection result for a session build.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionPlan {
    pub session: RevisionSession,
    pub added: usize,
    pub skipped: BTreeMap<IneligibleKind, usize>,
}

impl SessionPlan {
    /// Total number of problems in the resulting session.
    #[must_use]
    pub fn total(&self) -> usize {
        self.session.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.session.is_empty()
    }

    /// Number of candidates rejected for the given reason.
    #[must_use]
    pub fn skipped_for(&self, kind: IneligibleKind) -> usize {
        self.skipped.get(&kind).copied().unwrap_or(0)
    }

    /// Unwrap the session, refusing one with nothing to revise.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` when the session holds no problems.
    pub fn into_session(self) -> Result<RevisionSession, SessionError> {
        if self.session.is_empty() {
            return Err(SessionError::Empty);
        }
        Ok(self.session)
    }
}

/// Fills a revision session by running each candidate through the
/// eligibility rules against the session built so far.
pub struct SessionBuilder<'a> {
    settings: &'a RevisionSettings,
    clock: Clock,
    shuffle: bool,
}

impl<'a> SessionBuilder<'a> {
    #[must_use]
    pub fn new(settings: &'a RevisionSettings) -> Self {
        Self {
            settings,
            clock: Clock::default(),
            shuffle: false,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Enable or disable shuffling candidates before selection.
    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Extend `existing` with eligible candidates.
    ///
    /// - Without shuffling, unscheduled problems come first, then the most
    ///   overdue; ties break on id.
    /// - Selection stops once the session reaches the distribution total.
    pub fn build(
        self,
        candidates: impl IntoIterator<Item = Problem>,
        existing: RevisionSession,
    ) -> SessionPlan {
        let now = self.clock.now();
        let cap = usize::try_from(self.settings.difficulty_distribution().total())
            .unwrap_or(usize::MAX);

        let mut candidates: Vec<Problem> = candidates.into_iter().collect();
        if self.shuffle {
            candidates.as_mut_slice().shuffle(&mut rng());
        } else {
            candidates.sort_by(|a, b| {
                (a.next_revision_at(), a.id()).cmp(&(b.next_revision_at(), b.id()))
            });
        }

        let mut session = existing;
        let mut added = 0;
        let mut skipped: BTreeMap<IneligibleKind, usize> = BTreeMap::new();

        for problem in candidates {
            if session.len() >= cap {
                break;
            }
            match check_eligibility(Some(&problem), Some(self.settings), Some(&session), now) {
                Ok(()) => {
                    session.push(SessionEntry::new(problem, now));
                    added += 1;
                }
                Err(reason) => *skipped.entry(reason.kind()).or_insert(0) += 1,
            }
        }

        tracing::debug!(
            added,
            total = session.len(),
            skipped = skipped.values().sum::<usize>(),
            "built revision session"
        );

        SessionPlan {
            session,
            added,
            skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use revise_core::model::{
        Difficulty, DifficultyDistribution, ProblemId, ProblemStatus, RevisionMode, TagName,
    };
    use revise_core::time::{fixed_clock, fixed_now};

    fn problem(id: &str, difficulty: Difficulty) -> Problem {
        Problem::new(ProblemId::new(id).unwrap(), difficulty)
    }

    fn settings(easy: u32, medium: u32, hard: u32) -> RevisionSettings {
        RevisionSettings::new(
            DifficultyDistribution::new(easy, medium, hard),
            RevisionMode::Unset,
        )
    }

    #[test]
    fn builder_respects_difficulty_targets() {
        let settings = settings(2, 1, 1);
        let candidates = vec![
            problem("e1", Difficulty::Easy),
            problem("e2", Difficulty::Easy),
            problem("e3", Difficulty::Easy),
            problem("m1", Difficulty::Medium),
            problem("m2", Difficulty::Medium),
            problem("h1", Difficulty::Hard),
        ];

        let plan = SessionBuilder::new(&settings)
            .with_clock(fixed_clock())
            .build(candidates, RevisionSession::new());

        let counts = plan.session.difficulty_counts();
        assert_eq!(counts.easy, 2);
        assert_eq!(counts.medium, 1);
        assert_eq!(counts.hard, 1);
        assert_eq!(plan.added, 4);
        // m2 is never evaluated once the session is full
        assert_eq!(plan.skipped_for(IneligibleKind::DifficultyQuotaReached), 1);
    }

    #[test]
    fn builder_orders_by_next_revision() {
        let now = fixed_now();
        let settings = settings(2, 0, 0);
        let candidates = vec![
            problem("late", Difficulty::Easy).with_next_revision_at(Some(now - Duration::days(1))),
            problem("early", Difficulty::Easy).with_next_revision_at(Some(now - Duration::days(9))),
            problem("never", Difficulty::Easy),
        ];

        let plan = SessionBuilder::new(&settings)
            .with_clock(fixed_clock())
            .build(candidates, RevisionSession::new());

        let ids: Vec<&str> = plan.session.problems().map(|p| p.id().as_str()).collect();
        assert_eq!(ids, vec!["never", "early"]);
    }

    #[test]
    fn builder_skips_ineligible_and_existing() {
        let now = fixed_now();
        let settings = settings(3, 3, 3).with_topics(vec![TagName::new("dp").unwrap()]);
        let dp = vec![TagName::new("dp").unwrap()];
        let mut existing = RevisionSession::new();
        existing.push(SessionEntry::new(
            problem("kept", Difficulty::Hard).with_tags(dp.clone()),
            now,
        ));

        let candidates = vec![
            problem("kept", Difficulty::Hard).with_tags(dp.clone()),
            problem("done", Difficulty::Easy).with_status(ProblemStatus::Mastered),
            problem("later", Difficulty::Easy)
                .with_next_revision_at(Some(now + Duration::days(2))),
            problem("fresh", Difficulty::Medium).with_tags(dp),
        ];

        let plan = SessionBuilder::new(&settings)
            .with_clock(fixed_clock())
            .build(candidates, existing);

        assert_eq!(plan.total(), 2);
        assert_eq!(plan.added, 1);
        assert_eq!(plan.skipped_for(IneligibleKind::AlreadyInSession), 1);
        assert_eq!(plan.skipped_for(IneligibleKind::Mastered), 1);
        assert_eq!(plan.skipped_for(IneligibleKind::NotDue), 1);
    }

    #[test]
    fn scheduled_problem_joins_once_clock_reaches_it() {
        let settings = settings(2, 0, 0);
        let mut clock = fixed_clock();
        let candidates = vec![
            problem("now", Difficulty::Easy),
            problem("later", Difficulty::Easy)
                .with_next_revision_at(Some(fixed_now() + Duration::days(2))),
        ];

        let first = SessionBuilder::new(&settings)
            .with_clock(clock)
            .build(candidates.clone(), RevisionSession::new());
        assert_eq!(first.total(), 1);
        assert_eq!(first.skipped_for(IneligibleKind::NotDue), 1);

        clock.advance(Duration::days(2));
        let second = SessionBuilder::new(&settings)
            .with_clock(clock)
            .build(candidates, first.session);

        assert_eq!(second.added, 1);
        assert_eq!(second.skipped_for(IneligibleKind::AlreadyInSession), 1);
        let later = second.session.iter().last().unwrap();
        assert_eq!(later.problem.id().as_str(), "later");
        assert_eq!(later.meta.added_at, fixed_now() + Duration::days(2));
    }

    #[test]
    fn shuffled_build_still_caps_total() {
        let settings = settings(1, 1, 1);
        let candidates: Vec<Problem> = (0..20)
            .map(|i| {
                let difficulty = Difficulty::ALL[i % 3];
                problem(&format!("p{i}"), difficulty)
            })
            .collect();

        let plan = SessionBuilder::new(&settings)
            .with_shuffle(true)
            .with_clock(fixed_clock())
            .build(candidates, RevisionSession::new());

        assert_eq!(plan.total(), 3);
    }

    #[test]
    fn empty_plan_is_an_error() {
        let settings = settings(1, 0, 0);
        let plan = SessionBuilder::new(&settings)
            .with_clock(fixed_clock())
            .build(vec![problem("h1", Difficulty::Hard)], RevisionSession::new());

        assert!(plan.is_empty());
        assert!(matches!(plan.into_session(), Err(SessionError::Empty)));
    }
}
