//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` for layered configuration merging.
//! - Resolve each schema field from environment, env file or compiled default.
//! - Build the final `Settings`, reporting every failing field at once.
//!
//! Does NOT handle:
//! - Per-field coercion and constraint rules (see `schema.rs`).
//! - Env file parsing (see `file.rs`).
//!
//! Invariants / Assumptions:
//! - Environment variables take precedence over env file values, which take
//!   precedence over compiled defaults.
//! - An environment variable set to the empty string still wins over the file.
//! - The process environment is never modified; the env file is read, not exported.
//! - The `DOTENV_DISABLED` variable is checked before the env file is read.
//! - Constraint checks only run for fields whose coercion succeeded.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};

use super::env::EnvSnapshot;
use super::error::{ConfigError, FieldIssue, IssueKind, ValidationErrors, ValueSource};
use super::file::{dotenv_disabled, read_env_file};
use super::schema::{FIELDS, Field};
use crate::constants::DEFAULT_ENV_FILE;
use crate::types::Settings;

/// Configuration loader that builds `Settings` from an env file and environment variables.
#[derive(Clone)]
pub struct ConfigLoader {
    env_file: PathBuf,
    file_values: HashMap<String, String>,
    env: EnvSnapshot,
}

// Keys only: raw values may be secrets.
impl fmt::Debug for ConfigLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut file_keys: Vec<&String> = self.file_values.keys().collect();
        file_keys.sort();
        let mut env_keys: Vec<&String> = self.env.values.keys().collect();
        env_keys.sort();
        f.debug_struct("ConfigLoader")
            .field("env_file", &self.env_file)
            .field("file_keys", &file_keys)
            .field("env_keys", &env_keys)
            .finish()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Where a field's raw value was found.
enum Resolved<'a> {
    Value(&'a str, ValueSource),
    NotUnicode,
    Unset,
}

impl ConfigLoader {
    /// Create a new configuration loader with no layers loaded.
    pub fn new() -> Self {
        Self {
            env_file: PathBuf::from(DEFAULT_ENV_FILE),
            file_values: HashMap::new(),
            env: EnvSnapshot::default(),
        }
    }

    /// Load, validate and return `Settings` from `.env` and the process environment.
    pub fn load() -> Result<Settings, ConfigError> {
        Self::new().load_env_file()?.from_env().build()
    }

    /// Override the env file path (defaults to `.env` in the working directory).
    pub fn with_env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file = path.into();
        self
    }

    /// The env file path this loader reads.
    pub fn env_file(&self) -> &Path {
        &self.env_file
    }

    /// Read the env file into the file layer.
    ///
    /// If `DOTENV_DISABLED` is set to "true" or "1", the file is not read
    /// (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file exists but has invalid syntax (`ConfigError::DotenvParse`)
    /// - The file exists but cannot be read due to I/O errors (`ConfigError::DotenvIo`)
    ///
    /// A missing file is silently ignored (returns `Ok(self)`).
    ///
    /// SAFETY: Error messages never include raw file contents to prevent secret leakage.
    pub fn load_env_file(mut self) -> Result<Self, ConfigError> {
        if dotenv_disabled() {
            tracing::debug!("env file loading disabled via DOTENV_DISABLED");
            return Ok(self);
        }

        match read_env_file(&self.env_file)? {
            Some(pairs) => {
                tracing::debug!(
                    path = %self.env_file.display(),
                    entries = pairs.len(),
                    "loaded env file"
                );
                self.file_values.extend(pairs);
            }
            None => {
                tracing::debug!(path = %self.env_file.display(), "no env file found");
            }
        }
        Ok(self)
    }

    /// Snapshot the process environment for every known key.
    ///
    /// Environment variables take precedence over env file values.
    pub fn from_env(mut self) -> Self {
        self.env = EnvSnapshot::capture();
        self
    }

    /// Use an explicit environment snapshot instead of the process environment.
    pub fn with_env_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env = EnvSnapshot::from_pairs(vars);
        self
    }

    /// Add key/value pairs to the env file layer, as if read from the file.
    pub fn with_file_values<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.file_values
            .extend(vars.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    fn resolve(&self, key: &str) -> Resolved<'_> {
        if let Some(value) = self.env.values.get(key) {
            Resolved::Value(value, ValueSource::Environment)
        } else if self.env.not_unicode.contains(key) {
            Resolved::NotUnicode
        } else if let Some(value) = self.file_values.get(key) {
            Resolved::Value(value, ValueSource::EnvFile)
        } else {
            Resolved::Unset
        }
    }

    /// Build the final settings.
    ///
    /// Every field is resolved and coerced, then every successfully coerced
    /// field is checked. All failures are returned together.
    pub fn build(self) -> Result<Settings, ConfigError> {
        let mut settings = Settings::default();
        let mut issues = Vec::new();
        let mut sources = Vec::with_capacity(FIELDS.len());
        let mut coercion_failed = HashSet::new();

        for field in FIELDS {
            let source = match self.resolve(field.key) {
                Resolved::Value(raw, source) => {
                    if let Err(message) = (field.assign)(&mut settings, raw) {
                        coercion_failed.insert(field.key);
                        issues.push(FieldIssue {
                            key: field.key,
                            source,
                            kind: IssueKind::TypeCoercion,
                            message: with_value(field, &message, raw),
                        });
                    }
                    source
                }
                Resolved::NotUnicode => {
                    coercion_failed.insert(field.key);
                    issues.push(FieldIssue {
                        key: field.key,
                        source: ValueSource::Environment,
                        kind: IssueKind::TypeCoercion,
                        message: "value is not valid UTF-8".to_string(),
                    });
                    ValueSource::Environment
                }
                Resolved::Unset => ValueSource::Default,
            };
            tracing::debug!(key = field.key, source = %source, "resolved configuration field");
            sources.push(source);
        }

        for (field, source) in FIELDS.iter().zip(sources) {
            if coercion_failed.contains(field.key) {
                continue;
            }
            if let Err(message) = (field.check)(&settings) {
                issues.push(FieldIssue {
                    key: field.key,
                    source,
                    kind: IssueKind::Constraint,
                    message,
                });
            }
        }

        if let Some(errors) = ValidationErrors::from_issues(issues) {
            return Err(ConfigError::Invalid(errors));
        }
        Ok(settings)
    }
}

/// Append the offending value to a coercion message, unless the field is secret.
fn with_value(field: &Field, message: &str, raw: &str) -> String {
    if field.is_secret() {
        format!("{message}, got <redacted>")
    } else {
        format!("{message}, got \"{raw}\"")
    }
}
