//! Tests for the configuration loader.
//!
//! Responsibilities:
//! - Test layer precedence (environment > env file > default).
//! - Test env file loading, including the `DOTENV_DISABLED` gate.
//! - Test coercion and constraint failures, and that all of them are reported.
//!
//! Invariants:
//! - Tests that touch process-global state (cwd/env) use `serial_test`
//!   and `global_test_lock()`.
//! - Most tests inject an explicit environment via `with_env_vars` instead.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::path::PathBuf;
use std::sync::Mutex;

use tempfile::TempDir;

use crate::loader::schema::known_keys;

pub mod validation_tests;

/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Run `f` with every schema key and `DOTENV_DISABLED` unset, except `overrides`.
///
/// Keeps tests independent of whatever the runner's environment happens to export.
pub fn with_clean_env<R>(overrides: &[(&str, Option<&str>)], f: impl FnOnce() -> R) -> R {
    let mut vars: Vec<(String, Option<String>)> = known_keys()
        .chain(["DOTENV_DISABLED"])
        .map(|key| (key.to_string(), None))
        .collect();
    for (key, value) in overrides {
        vars.retain(|(existing, _)| existing != key);
        vars.push((key.to_string(), value.map(str::to_string)));
    }
    temp_env::with_vars(vars, f)
}

/// RAII guard for temporarily changing the current working directory.
///
/// The original directory is restored on drop, including when the test panics.
pub struct CwdGuard {
    original_dir: PathBuf,
}

impl CwdGuard {
    pub fn new(temp_dir: &TempDir) -> Self {
        let original_dir = std::env::current_dir().expect("Failed to get current directory");
        std::env::set_current_dir(temp_dir.path()).expect("Failed to set current directory");
        Self { original_dir }
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original_dir);
    }
}
