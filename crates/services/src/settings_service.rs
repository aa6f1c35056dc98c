use serde::Deserialize;

use revise_core::model::{Problem, ProblemDraft, RevisionSettings, RevisionSettingsDraft};

use crate::error::SettingsServiceError;

/// Wrapped form of a problem list: `{ "problems": [...] }`.
#[derive(Deserialize)]
struct ProblemsEnvelope {
    problems: Vec<ProblemDraft>,
}

/// Parse and validate user settings from their JSON form.
///
/// # Errors
///
/// Returns `SettingsServiceError` if the JSON is malformed or validation fails.
pub fn parse_settings_json(json: &str) -> Result<RevisionSettings, SettingsServiceError> {
    let draft: RevisionSettingsDraft = serde_json::from_str(json)?;
    Ok(draft.validate()?)
}

/// Like [`parse_settings_json`], falling back to defaults when nothing is stored.
///
/// # Errors
///
/// Returns `SettingsServiceError` if stored JSON is present but invalid.
pub fn load_settings_or_default(
    json: Option<&str>,
) -> Result<RevisionSettings, SettingsServiceError> {
    match json.map(str::trim).filter(|s| !s.is_empty()) {
        Some(json) => parse_settings_json(json),
        None => Ok(RevisionSettings::default()),
    }
}

/// Parse and validate a list of problems, given as a bare array or wrapped
/// in `{ "problems": [...] }`.
///
/// # Errors
///
/// Returns `SettingsServiceError` on malformed JSON or the first invalid problem.
pub fn parse_problems_json(json: &str) -> Result<Vec<Problem>, SettingsServiceError> {
    let drafts: Vec<ProblemDraft> = if json.trim_start().starts_with('[') {
        serde_json::from_str(json)?
    } else {
        serde_json::from_str::<ProblemsEnvelope>(json)?.problems
    };
    let problems = drafts
        .into_iter()
        .map(ProblemDraft::validate)
        .collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(count = problems.len(), "parsed problems");
    Ok(problems)
}
