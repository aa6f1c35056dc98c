//! Shared error types for the services crate.

use thiserror::Error;

use revise_core::model::{ProblemError, SettingsError};

/// Errors emitted while turning a plan into a usable session.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no problems available for session")]
    Empty,
}

/// Errors emitted while reading settings or problems from JSON.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingsServiceError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Problem(#[from] ProblemError),
}
