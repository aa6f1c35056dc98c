use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::problem::Difficulty;
use crate::model::tag::TagName;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("difficulty distribution must allow at least one problem")]
    EmptyDistribution,
}

//
// ─── DIFFICULTY DISTRIBUTION ───────────────────────────────────────────────────
//

/// Maximum number of problems per difficulty in one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyDistribution {
    pub easy: u32,
    pub medium: u32,
    pub hard: u32,
}

impl DifficultyDistribution {
    #[must_use]
    pub fn new(easy: u32, medium: u32, hard: u32) -> Self {
        Self { easy, medium, hard }
    }

    #[must_use]
    pub fn target(&self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }

    /// Session size implied by the three targets.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.easy
            .saturating_add(self.medium)
            .saturating_add(self.hard)
    }
}

impl Default for DifficultyDistribution {
    fn default() -> Self {
        Self {
            easy: 2,
            medium: 2,
            hard: 1,
        }
    }
}

//
// ─── REVISION MODE ─────────────────────────────────────────────────────────────
//

/// Strategy narrowing which problems are eligible by tag overlap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RevisionMode {
    Topic,
    Company,
    Combo,
    /// No mode chosen, or a label this version does not know.
    #[default]
    Unset,
}

impl RevisionMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RevisionMode::Topic => "TOPIC",
            RevisionMode::Company => "COMPANY",
            RevisionMode::Combo => "COMBO",
            RevisionMode::Unset => "",
        }
    }

    /// Lenient parse; unknown labels map to `Unset`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "TOPIC" => RevisionMode::Topic,
            "COMPANY" => RevisionMode::Company,
            "COMBO" => RevisionMode::Combo,
            _ => RevisionMode::Unset,
        }
    }
}

impl From<String> for RevisionMode {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<RevisionMode> for String {
    fn from(mode: RevisionMode) -> Self {
        mode.as_str().to_string()
    }
}

impl fmt::Display for RevisionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// User settings as stored by the frontend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionSettingsDraft {
    #[serde(default)]
    pub difficulty_distribution: Option<DifficultyDistribution>,
    #[serde(default)]
    pub revision_mode: Option<RevisionMode>,
    #[serde(default)]
    pub custom_revision_topics: Option<Vec<String>>,
    #[serde(default)]
    pub custom_revision_companies: Option<Vec<String>>,
}

impl RevisionSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and normalize the draft.
    ///
    /// Blank topic and company entries are dropped.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::EmptyDistribution` if every target is zero.
    pub fn validate(self) -> Result<RevisionSettings, SettingsError> {
        let difficulty_distribution = self.difficulty_distribution.unwrap_or_default();
        if difficulty_distribution.total() == 0 {
            return Err(SettingsError::EmptyDistribution);
        }

        Ok(RevisionSettings {
            difficulty_distribution,
            revision_mode: self.revision_mode.unwrap_or_default(),
            custom_revision_topics: self.custom_revision_topics.map(normalize_labels),
            custom_revision_companies: self.custom_revision_companies.map(normalize_labels),
        })
    }
}

fn normalize_labels(raw: Vec<String>) -> BTreeSet<TagName> {
    raw.into_iter().filter_map(|s| TagName::new(s).ok()).collect()
}

/// Validated revision settings consumed by the eligibility check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevisionSettings {
    difficulty_distribution: DifficultyDistribution,
    revision_mode: RevisionMode,
    custom_revision_topics: Option<BTreeSet<TagName>>,
    custom_revision_companies: Option<BTreeSet<TagName>>,
}

impl RevisionSettings {
    #[must_use]
    pub fn new(difficulty_distribution: DifficultyDistribution, revision_mode: RevisionMode) -> Self {
        Self {
            difficulty_distribution,
            revision_mode,
            custom_revision_topics: None,
            custom_revision_companies: None,
        }
    }

    #[must_use]
    pub fn with_topics(mut self, topics: impl IntoIterator<Item = TagName>) -> Self {
        self.custom_revision_topics = Some(topics.into_iter().collect());
        self
    }

    #[must_use]
    pub fn with_companies(mut self, companies: impl IntoIterator<Item = TagName>) -> Self {
        self.custom_revision_companies = Some(companies.into_iter().collect());
        self
    }

    #[must_use]
    pub fn difficulty_distribution(&self) -> &DifficultyDistribution {
        &self.difficulty_distribution
    }

    #[must_use]
    pub fn revision_mode(&self) -> RevisionMode {
        self.revision_mode
    }

    #[must_use]
    pub fn custom_revision_topics(&self) -> Option<&BTreeSet<TagName>> {
        self.custom_revision_topics.as_ref()
    }

    #[must_use]
    pub fn custom_revision_companies(&self) -> Option<&BTreeSet<TagName>> {
        self.custom_revision_companies.as_ref()
    }

    /// Configured topics, only when at least one is set.
    #[must_use]
    pub fn topic_filter(&self) -> Option<&BTreeSet<TagName>> {
        self.custom_revision_topics
            .as_ref()
            .filter(|set| !set.is_empty())
    }

    /// Configured companies, only when at least one is set.
    #[must_use]
    pub fn company_filter(&self) -> Option<&BTreeSet<TagName>> {
        self.custom_revision_companies
            .as_ref()
            .filter(|set| !set.is_empty())
    }
}
