//! Process exit codes for scripting and deployment tooling.
//!
//! Responsibilities:
//! - Define structured exit codes so supervisors can tell bad configuration
//!   apart from runtime failures.
//!
//! Does NOT handle:
//! - Error message formatting (handled by the error's `Display`).
//!
//! Invariants:
//! - Configuration failures always exit with `ConfigError` (2).

use movescrow_config::ConfigError;

/// Structured exit codes for movescrow-api.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - clean shutdown or `--check` passed.
    Success = 0,

    /// General error - bind or serve failure.
    GeneralError = 1,

    /// Configuration error - env file unreadable or a field invalid.
    ///
    /// Restarting without changing the configuration will fail the same way.
    ConfigError = 2,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(_: &ConfigError) -> Self {
        ExitCode::ConfigError
    }
}
