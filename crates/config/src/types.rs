//! Configuration type definitions for the Movescrow API.
//!
//! Responsibilities:
//! - Define the `Settings` record and the typed values it holds.
//!
//! Does NOT handle:
//! - Loading or validating values (see `loader` module).
//!
//! Invariants:
//! - All secret values use `secrecy::SecretString` to prevent accidental logging.

mod algorithm;
mod settings;

pub use algorithm::{SigningAlgorithm, UnknownAlgorithm};
pub(crate) use settings::secret;
pub use settings::Settings;
