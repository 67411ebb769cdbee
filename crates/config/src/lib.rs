//! Configuration management for the Movescrow API.
//!
//! This crate resolves the process-wide [`Settings`] record from compiled
//! defaults, an optional `.env` file and environment variables.

pub mod constants;
mod loader;
pub mod types;

pub use loader::{
    ConfigError, ConfigLoader, FALSE_SPELLINGS, FieldIssue, FieldKind, IssueKind, SummaryEntry,
    TRUE_SPELLINGS, ValidationErrors, ValueSource, known_keys, normalize_origin,
};
pub use types::{Settings, SigningAlgorithm, UnknownAlgorithm};
