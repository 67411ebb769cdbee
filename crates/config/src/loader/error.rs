//! Error types for configuration loading.
//!
//! Responsibilities:
//! - Define error variants for all configuration loading failures.
//! - Collect every per-field failure into a single `ValidationErrors` report.
//!
//! Does NOT handle:
//! - Deciding what is valid (see `schema.rs` and `coerce.rs`).
//!
//! Invariants:
//! - A `ValidationErrors` value is never empty.
//! - Messages for secret fields never include the offending value.
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.

use std::fmt;
use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// One or more fields failed coercion or a constraint check.
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),

    /// Failed to parse the env file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse env file {} at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading",
        .path.display()
    )]
    DotenvParse { path: PathBuf, error_index: usize },

    /// Failed to read the env file due to an I/O error other than "not found".
    #[error("Failed to read env file {}: {kind}", .path.display())]
    DotenvIo { path: PathBuf, kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    ///
    /// SAFETY: This error does not include any raw dotenv content.
    #[error("Failed to load env file {}. Hint: set DOTENV_DISABLED=1 to skip .env loading", .path.display())]
    DotenvUnknown { path: PathBuf },
}

impl ConfigError {
    /// The per-field report, if this is a validation failure.
    pub fn validation(&self) -> Option<&ValidationErrors> {
        match self {
            ConfigError::Invalid(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Layer a configuration value was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueSource {
    Environment,
    EnvFile,
    Default,
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueSource::Environment => "environment",
            ValueSource::EnvFile => "env file",
            ValueSource::Default => "default",
        })
    }
}

/// Category of a per-field failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueKind {
    /// The text could not be converted to the field's type.
    TypeCoercion,
    /// The value has the right type but breaks a semantic rule.
    Constraint,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IssueKind::TypeCoercion => "invalid type",
            IssueKind::Constraint => "constraint violated",
        })
    }
}

/// A single field that failed to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    /// Environment variable name of the field (e.g. `ACCESS_TOKEN_EXPIRE_MINUTES`).
    pub key: &'static str,
    pub source: ValueSource,
    pub kind: IssueKind,
    pub message: String,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (from {}): {}: {}",
            self.key, self.source, self.kind, self.message
        )
    }
}

/// Every field that failed to load, in schema order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", render_issues(.issues))]
pub struct ValidationErrors {
    issues: Vec<FieldIssue>,
}

impl ValidationErrors {
    /// Wrap a non-empty list of issues. Returns `None` when `issues` is empty.
    pub(crate) fn from_issues(issues: Vec<FieldIssue>) -> Option<Self> {
        if issues.is_empty() {
            None
        } else {
            Some(Self { issues })
        }
    }

    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Never true for a value returned by the loader.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Find the issue reported for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&FieldIssue> {
        self.issues.iter().find(|issue| issue.key == key)
    }
}

fn render_issues(issues: &[FieldIssue]) -> String {
    let noun = if issues.len() == 1 { "field" } else { "fields" };
    let mut out = format!("invalid configuration ({} {}):", issues.len(), noun);
    for issue in issues {
        out.push_str("\n  - ");
        out.push_str(&issue.to_string());
    }
    out
}
