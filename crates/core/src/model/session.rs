use chrono::{DateTime, Utc};

use crate::model::ids::ProblemId;
use crate::model::problem::{Difficulty, Problem};

/// Bookkeeping attached to a problem when it joins a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionEntryMeta {
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEntry {
    pub problem: Problem,
    pub meta: SessionEntryMeta,
}

impl SessionEntry {
    #[must_use]
    pub fn new(problem: Problem, added_at: DateTime<Utc>) -> Self {
        Self {
            problem,
            meta: SessionEntryMeta { added_at },
        }
    }
}

/// Per-difficulty tally of the problems already in a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DifficultyCounts {
    pub easy: u32,
    pub medium: u32,
    pub hard: u32,
}

impl DifficultyCounts {
    #[must_use]
    pub fn count(&self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }

    fn bump(&mut self, difficulty: Difficulty) {
        let slot = match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Medium => &mut self.medium,
            Difficulty::Hard => &mut self.hard,
        };
        *slot = slot.saturating_add(1);
    }
}

/// An in-progress revision session, in the order problems were accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevisionSession {
    entries: Vec<SessionEntry>,
}

impl RevisionSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_entries(entries: Vec<SessionEntry>) -> Self {
        Self { entries }
    }

    /// Append an accepted problem. Callers check eligibility first.
    pub fn push(&mut self, entry: SessionEntry) {
        self.entries.push(entry);
    }

    #[must_use]
    pub fn contains(&self, id: &ProblemId) -> bool {
        self.entries.iter().any(|e| e.problem.id() == id)
    }

    #[must_use]
    pub fn difficulty_counts(&self) -> DifficultyCounts {
        let mut counts = DifficultyCounts::default();
        for entry in &self.entries {
            counts.bump(entry.problem.difficulty());
        }
        counts
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SessionEntry> {
        self.entries.iter()
    }

    pub fn problems(&self) -> impl Iterator<Item = &Problem> {
        self.entries.iter().map(|e| &e.problem)
    }
}
