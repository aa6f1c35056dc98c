#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;
pub mod settings_service;

pub use revise_core::Clock;

pub use error::{SessionError, SettingsServiceError};
pub use sessions::{SessionBuilder, SessionPlan};
pub use settings_service::{load_settings_or_default, parse_problems_json, parse_settings_json};
