//! Process environment snapshot.
//!
//! Responsibilities:
//! - Read every schema key from the live process environment, exactly once.
//!
//! Does NOT handle:
//! - Coercion or validation (see `schema.rs`).
//! - .env file loading (see `file.rs`).
//!
//! Invariants:
//! - Lookups are case-sensitive and exact; no aliasing or case folding.
//! - A variable set to the empty string counts as set.
//! - Values are taken verbatim (no trimming).

use std::collections::{BTreeSet, HashMap};

use super::schema::known_keys;

/// Values read from the process environment for the schema keys.
///
/// Not `Debug`: values may be secrets.
#[derive(Default, Clone)]
pub(crate) struct EnvSnapshot {
    pub values: HashMap<String, String>,
    /// Keys whose value is present but not valid UTF-8.
    pub not_unicode: BTreeSet<String>,
}

impl EnvSnapshot {
    pub fn capture() -> Self {
        let mut snapshot = Self::default();
        for key in known_keys() {
            match std::env::var_os(key).map(|value| value.into_string()) {
                Some(Ok(value)) => {
                    snapshot.values.insert(key.to_string(), value);
                }
                Some(Err(_)) => {
                    snapshot.not_unicode.insert(key.to_string());
                }
                None => {}
            }
        }
        snapshot
    }

    pub fn from_pairs<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            not_unicode: BTreeSet::new(),
        }
    }
}
