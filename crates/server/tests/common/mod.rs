//! Shared test utilities for movescrow-api integration tests.
//!
//! Invariants / Assumptions:
//! - Commands are hermetic: no host configuration variable leaks into the child.
//! - `DOTENV_DISABLED=1` is set unless a test opts back into env file loading.

use assert_cmd::Command;
use movescrow_config::known_keys;

/// Returns a hermetic `movescrow-api` command with env file loading disabled.
pub fn api_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("movescrow-api");

    for key in known_keys() {
        cmd.env_remove(key);
    }
    cmd.env_remove("RUST_LOG");
    cmd.env("DOTENV_DISABLED", "1");

    cmd
}

/// Returns a hermetic command that does read env files.
#[allow(dead_code)]
pub fn api_cmd_with_dotenv() -> Command {
    let mut cmd = api_cmd();
    cmd.env_remove("DOTENV_DISABLED");
    cmd
}
