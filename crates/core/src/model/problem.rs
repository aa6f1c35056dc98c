use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{ParseIdError, ProblemId};
use crate::model::tag::TagName;
use crate::time::parse_timestamp;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProblemError {
    #[error(transparent)]
    InvalidId(#[from] ParseIdError),

    #[error("unknown difficulty: {0:?}")]
    InvalidDifficulty(String),
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// Difficulty bucket of a practice problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive: `"EASY"`, `"easy"` and `"Easy"` all parse.
impl FromStr for Difficulty {
    type Err = ProblemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ProblemError::InvalidDifficulty(s.to_string())),
        }
    }
}

impl TryFrom<String> for Difficulty {
    type Error = ProblemError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Difficulty> for String {
    fn from(d: Difficulty) -> Self {
        d.as_str().to_string()
    }
}

//
// ─── STATUS ────────────────────────────────────────────────────────────────────
//

/// Learning status of a problem. Unrecognized labels are kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProblemStatus {
    #[default]
    Pending,
    Revisiting,
    Mastered,
    Other(String),
}

impl ProblemStatus {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            ProblemStatus::Pending => "Pending",
            ProblemStatus::Revisiting => "Revisiting",
            ProblemStatus::Mastered => "Mastered",
            ProblemStatus::Other(raw) => raw,
        }
    }
}

impl From<&str> for ProblemStatus {
    fn from(value: &str) -> Self {
        match value {
            "Pending" => ProblemStatus::Pending,
            "Revisiting" => ProblemStatus::Revisiting,
            "Mastered" => ProblemStatus::Mastered,
            other => ProblemStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for ProblemStatus {
    fn from(value: String) -> Self {
        ProblemStatus::from(value.as_str())
    }
}

impl From<ProblemStatus> for String {
    fn from(status: ProblemStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for ProblemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── PROBLEM ───────────────────────────────────────────────────────────────────
//

/// Raw problem record as delivered by the data layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemDraft {
    #[serde(alias = "_id")]
    pub id: String,
    pub difficulty: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub archived: bool,
    #[serde(default, rename = "nextRevisionDate")]
    pub next_revision_at: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub company_tags: Option<Vec<String>>,
}

impl ProblemDraft {
    /// Validate the raw record into a `Problem`.
    ///
    /// Optional fields never fail validation: a missing status is `Pending`,
    /// blank tags are dropped and an unreadable revision date counts as unscheduled.
    ///
    /// # Errors
    ///
    /// Returns `ProblemError` if the id or difficulty is invalid.
    pub fn validate(self) -> Result<Problem, ProblemError> {
        let id = ProblemId::new(&self.id)?;
        let difficulty = self.difficulty.parse()?;
        let status = self.status.map(ProblemStatus::from).unwrap_or_default();
        let next_revision_at = self.next_revision_at.as_deref().and_then(|raw| {
            let parsed = parse_timestamp(raw);
            if parsed.is_none() {
                tracing::debug!(problem = %id, value = raw, "ignoring unreadable revision date");
            }
            parsed
        });

        Ok(Problem {
            id,
            difficulty,
            status,
            archived: self.archived,
            next_revision_at,
            tags: collect_tags(self.tags),
            company_tags: collect_tags(self.company_tags),
        })
    }
}

fn collect_tags(raw: Option<Vec<String>>) -> BTreeSet<TagName> {
    raw.unwrap_or_default()
        .into_iter()
        .filter_map(|s| TagName::new(s).ok())
        .collect()
}

/// A practice problem tracked by the user. Read-only for session logic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    id: ProblemId,
    difficulty: Difficulty,
    status: ProblemStatus,
    archived: bool,
    next_revision_at: Option<DateTime<Utc>>,
    tags: BTreeSet<TagName>,
    company_tags: BTreeSet<TagName>,
}

impl Problem {
    /// A pending, unarchived problem with no schedule and no tags.
    #[must_use]
    pub fn new(id: ProblemId, difficulty: Difficulty) -> Self {
        Self {
            id,
            difficulty,
            status: ProblemStatus::Pending,
            archived: false,
            next_revision_at: None,
            tags: BTreeSet::new(),
            company_tags: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: ProblemStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_archived(mut self, archived: bool) -> Self {
        self.archived = archived;
        self
    }

    #[must_use]
    pub fn with_next_revision_at(mut self, at: Option<DateTime<Utc>>) -> Self {
        self.next_revision_at = at;
        self
    }

    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = TagName>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_company_tags(mut self, tags: impl IntoIterator<Item = TagName>) -> Self {
        self.company_tags = tags.into_iter().collect();
        self
    }

    #[must_use]
    pub fn id(&self) -> &ProblemId {
        &self.id
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn status(&self) -> &ProblemStatus {
        &self.status
    }

    #[must_use]
    pub fn is_archived(&self) -> bool {
        self.archived
    }

    #[must_use]
    pub fn next_revision_at(&self) -> Option<DateTime<Utc>> {
        self.next_revision_at
    }

    #[must_use]
    pub fn tags(&self) -> &BTreeSet<TagName> {
        &self.tags
    }

    #[must_use]
    pub fn company_tags(&self) -> &BTreeSet<TagName> {
        &self.company_tags
    }

    #[must_use]
    pub fn is_mastered(&self) -> bool {
        self.status == ProblemStatus::Mastered
    }

    /// True unless the next revision is strictly after `now`.
    #[must_use]
    pub fn is_due_at(&self, now: DateTime<Utc>) -> bool {
        self.next_revision_at.is_none_or(|at| at <= now)
    }

    #[must_use]
    pub fn has_any_tag(&self, wanted: &BTreeSet<TagName>) -> bool {
        !self.tags.is_disjoint(wanted)
    }

    #[must_use]
    pub fn has_any_company(&self, wanted: &BTreeSet<TagName>) -> bool {
        !self.company_tags.is_disjoint(wanted)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;
    use chrono::Duration;

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("EASY".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!("medium".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert!(matches!(
            "extreme".parse::<Difficulty>(),
            Err(ProblemError::InvalidDifficulty(_))
        ));
    }

    #[test]
    fn status_keeps_unknown_labels() {
        assert_eq!(ProblemStatus::from("Mastered"), ProblemStatus::Mastered);
        assert_eq!(
            ProblemStatus::from("mastered"),
            ProblemStatus::Other("mastered".to_string())
        );
    }

    #[test]
    fn draft_validates_from_json() {
        let json = r#"{
            "_id": "65F00A",
            "difficulty": "hard",
            "status": "Revisiting",
            "nextRevisionDate": "2023-11-10T00:00:00Z",
            "tags": ["dp", " graphs "],
            "companyTags": ["Acme"]
        }"#;
        let draft: ProblemDraft = serde_json::from_str(json).unwrap();
        let problem = draft.validate().unwrap();

        assert_eq!(problem.id().as_str(), "65f00a");
        assert_eq!(problem.difficulty(), Difficulty::Hard);
        assert_eq!(problem.status(), &ProblemStatus::Revisiting);
        assert!(!problem.is_archived());
        assert!(problem.tags().contains(&TagName::new("graphs").unwrap()));
        assert_eq!(problem.company_tags().len(), 1);
    }

    #[test]
    fn draft_without_status_is_pending() {
        let draft = ProblemDraft {
            id: "p1".into(),
            difficulty: "Easy".into(),
            ..ProblemDraft::default()
        };
        assert_eq!(draft.validate().unwrap().status(), &ProblemStatus::Pending);
    }

    #[test]
    fn draft_drops_blank_tags() {
        let draft = ProblemDraft {
            id: "p1".into(),
            difficulty: "Easy".into(),
            tags: Some(vec!["dp".into(), "".into(), "  ".into()]),
            company_tags: Some(vec![" ".into()]),
            ..ProblemDraft::default()
        };
        let problem = draft.validate().unwrap();
        assert_eq!(problem.tags().len(), 1);
        assert!(problem.company_tags().is_empty());
    }

    #[test]
    fn null_tag_lists_are_empty() {
        let json = r#"{ "id": "p1", "difficulty": "Easy", "tags": null, "companyTags": null }"#;
        let draft: ProblemDraft = serde_json::from_str(json).unwrap();
        let problem = draft.validate().unwrap();
        assert!(problem.tags().is_empty());
        assert!(problem.company_tags().is_empty());
    }

    #[test]
    fn date_only_revision_is_midnight_utc() {
        let json = r#"{ "id": "p1", "difficulty": "Easy", "nextRevisionDate": "2024-03-05" }"#;
        let draft: ProblemDraft = serde_json::from_str(json).unwrap();
        let problem = draft.validate().unwrap();
        let expected = DateTime::parse_from_rfc3339("2024-03-05T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(problem.next_revision_at(), Some(expected));
    }

    #[test]
    fn unreadable_revision_date_is_unscheduled() {
        let draft = ProblemDraft {
            id: "p1".into(),
            difficulty: "Easy".into(),
            next_revision_at: Some("someday".into()),
            ..ProblemDraft::default()
        };
        assert_eq!(draft.validate().unwrap().next_revision_at(), None);
    }

    #[test]
    fn due_check_is_inclusive_of_now() {
        let now = fixed_now();
        let base = Problem::new(ProblemId::new("p1").unwrap(), Difficulty::Easy);
        assert!(base.is_due_at(now));
        assert!(base.clone().with_next_revision_at(Some(now)).is_due_at(now));
        assert!(
            !base
                .with_next_revision_at(Some(now + Duration::seconds(1)))
                .is_due_at(now)
        );
    }
}
