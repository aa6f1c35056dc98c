mod ids;
mod problem;
mod session;
mod settings;
mod tag;

pub use ids::{ParseIdError, ProblemId};
pub use problem::{Difficulty, Problem, ProblemDraft, ProblemError, ProblemStatus};
pub use session::{DifficultyCounts, RevisionSession, SessionEntry, SessionEntryMeta};
pub use settings::{
    DifficultyDistribution, RevisionMode, RevisionSettings, RevisionSettingsDraft, SettingsError,
};
pub use tag::{TagError, TagName};
