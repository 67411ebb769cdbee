//! Configuration loader for environment variables and env files.
//!
//! Responsibilities:
//! - Load configuration from compiled defaults, an optional `.env` file and the process environment.
//! - Provide a builder-pattern `ConfigLoader` for layered configuration merging.
//! - Describe every field once in a declarative schema table.
//! - Enforce `DOTENV_DISABLED` gate to prevent accidental dotenv loading in tests.
//!
//! Does NOT handle:
//! - Consuming configuration (the server crate does that).
//! - Writing configuration anywhere.
//!
//! Invariants / Assumptions:
//! - Environment variables take precedence over env file values, which take
//!   precedence over compiled defaults.
//! - All failing fields are reported together.

mod builder;
mod coerce;
mod env;
mod error;
mod file;
mod schema;

#[cfg(test)]
mod tests;

pub use builder::ConfigLoader;
pub use coerce::{FALSE_SPELLINGS, TRUE_SPELLINGS, normalize_origin};
pub use error::{ConfigError, FieldIssue, IssueKind, ValidationErrors, ValueSource};
pub use schema::{FieldKind, SummaryEntry, known_keys};
