//! Declarative field table for `Settings`.
//!
//! Responsibilities:
//! - Map each environment variable name to its `Settings` field, value kind and secrecy.
//! - Coerce raw text into the field (`assign`) and check semantic rules (`check`).
//! - Render a redacted view of every field for diagnostics.
//!
//! Does NOT handle:
//! - Choosing which layer a raw value comes from (see `builder.rs`).
//!
//! Invariants:
//! - Every `Settings` field has exactly one entry, and keys are unique.
//! - Keys are matched case-sensitively against environment variable names.
//! - `render` never exposes a secret field.
//! - `check` runs on the fully assigned record, so cross-field rules can read other fields.

use secrecy::ExposeSecret;
use std::fmt;

use super::coerce::{
    check_connection_uri, check_host, check_origin, check_route_prefix, check_semver,
    check_websocket_url, parse_bool, parse_i64, parse_port, parse_string_list,
};
use crate::constants::DEFAULT_SECRET_KEY;
use crate::types::{SigningAlgorithm, Settings, secret};

/// Type of value a field holds, as shown in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Secret,
    Boolean,
    Integer,
    Algorithm,
    List,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            FieldKind::String => "string",
            FieldKind::Secret => "secret",
            FieldKind::Boolean => "boolean",
            FieldKind::Integer => "integer",
            FieldKind::Algorithm => "algorithm",
            FieldKind::List => "list",
        })
    }
}

/// One row of the schema.
pub(crate) struct Field {
    pub key: &'static str,
    pub kind: FieldKind,
    pub assign: fn(&mut Settings, &str) -> Result<(), String>,
    pub check: fn(&Settings) -> Result<(), String>,
    pub render: fn(&Settings) -> String,
}

impl Field {
    pub fn is_secret(&self) -> bool {
        self.kind == FieldKind::Secret
    }
}

fn unchecked(_: &Settings) -> Result<(), String> {
    Ok(())
}

fn non_empty(value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err("must not be empty".to_string())
    } else {
        Ok(())
    }
}

fn redacted(value: &secrecy::SecretString) -> String {
    if value.expose_secret().is_empty() {
        "<empty>".to_string()
    } else {
        "<redacted>".to_string()
    }
}

pub(crate) static FIELDS: &[Field] = &[
    Field {
        key: "API_V1_PREFIX",
        kind: FieldKind::String,
        assign: |s, raw| {
            s.api_prefix = raw.to_string();
            Ok(())
        },
        check: |s| check_route_prefix(&s.api_prefix),
        render: |s| s.api_prefix.clone(),
    },
    Field {
        key: "PROJECT_NAME",
        kind: FieldKind::String,
        assign: |s, raw| {
            s.project_name = raw.to_string();
            Ok(())
        },
        check: |s| non_empty(&s.project_name),
        render: |s| s.project_name.clone(),
    },
    Field {
        key: "VERSION",
        kind: FieldKind::String,
        assign: |s, raw| {
            s.version = raw.to_string();
            Ok(())
        },
        check: |s| check_semver(&s.version),
        render: |s| s.version.clone(),
    },
    Field {
        key: "DEBUG",
        kind: FieldKind::Boolean,
        assign: |s, raw| {
            s.debug = parse_bool(raw)?;
            Ok(())
        },
        check: unchecked,
        render: |s| s.debug.to_string(),
    },
    Field {
        key: "DATABASE_URL",
        kind: FieldKind::Secret,
        assign: |s, raw| {
            s.database_url = secret(raw);
            Ok(())
        },
        check: |s| check_connection_uri(s.database_url.expose_secret()),
        render: |s| redacted(&s.database_url),
    },
    Field {
        key: "SECRET_KEY",
        kind: FieldKind::Secret,
        assign: |s, raw| {
            s.secret_key = secret(raw);
            Ok(())
        },
        check: |s| {
            let key = s.secret_key.expose_secret();
            non_empty(key)?;
            if s.is_production() && key == DEFAULT_SECRET_KEY {
                return Err("must be changed from the placeholder default when DEBUG is false"
                    .to_string());
            }
            Ok(())
        },
        render: |s| redacted(&s.secret_key),
    },
    Field {
        key: "ALGORITHM",
        kind: FieldKind::Algorithm,
        assign: |s, raw| {
            s.algorithm = raw
                .trim()
                .parse::<SigningAlgorithm>()
                .map_err(|_| {
                    let known: Vec<&str> =
                        SigningAlgorithm::ALL.iter().map(|a| a.as_str()).collect();
                    format!("expected one of {}", known.join(", "))
                })?;
            Ok(())
        },
        check: unchecked,
        render: |s| s.algorithm.to_string(),
    },
    Field {
        key: "ACCESS_TOKEN_EXPIRE_MINUTES",
        kind: FieldKind::Integer,
        assign: |s, raw| {
            s.access_token_expire_minutes = parse_i64(raw)?;
            Ok(())
        },
        check: |s| {
            if s.access_token_expire_minutes <= 0 {
                return Err(format!(
                    "must be greater than 0, got {}",
                    s.access_token_expire_minutes
                ));
            }
            Ok(())
        },
        render: |s| s.access_token_expire_minutes.to_string(),
    },
    Field {
        key: "ALLOWED_ORIGINS",
        kind: FieldKind::List,
        assign: |s, raw| {
            s.allowed_origins = parse_string_list(raw)?;
            Ok(())
        },
        check: |s| {
            let problems: Vec<String> = s
                .allowed_origins
                .iter()
                .filter_map(|origin| check_origin(origin).err())
                .collect();
            if problems.is_empty() {
                Ok(())
            } else {
                Err(problems.join("; "))
            }
        },
        render: |s| s.allowed_origins.join(","),
    },
    Field {
        key: "PAYSTACK_SECRET_KEY",
        kind: FieldKind::Secret,
        assign: |s, raw| {
            s.paystack_secret_key = secret(raw);
            Ok(())
        },
        check: unchecked,
        render: |s| redacted(&s.paystack_secret_key),
    },
    Field {
        key: "PAYSTACK_PUBLIC_KEY",
        kind: FieldKind::Secret,
        assign: |s, raw| {
            s.paystack_public_key = secret(raw);
            Ok(())
        },
        check: unchecked,
        render: |s| redacted(&s.paystack_public_key),
    },
    Field {
        key: "FLUTTERWAVE_SECRET_KEY",
        kind: FieldKind::Secret,
        assign: |s, raw| {
            s.flutterwave_secret_key = secret(raw);
            Ok(())
        },
        check: unchecked,
        render: |s| redacted(&s.flutterwave_secret_key),
    },
    Field {
        key: "FLUTTERWAVE_PUBLIC_KEY",
        kind: FieldKind::Secret,
        assign: |s, raw| {
            s.flutterwave_public_key = secret(raw);
            Ok(())
        },
        check: unchecked,
        render: |s| redacted(&s.flutterwave_public_key),
    },
    Field {
        key: "WEBSOCKET_URL",
        kind: FieldKind::String,
        assign: |s, raw| {
            s.websocket_url = raw.to_string();
            Ok(())
        },
        check: |s| check_websocket_url(&s.websocket_url),
        render: |s| s.websocket_url.clone(),
    },
    Field {
        key: "HOST",
        kind: FieldKind::String,
        assign: |s, raw| {
            s.host = raw.to_string();
            Ok(())
        },
        check: |s| check_host(&s.host),
        render: |s| s.host.clone(),
    },
    Field {
        key: "PORT",
        kind: FieldKind::Integer,
        assign: |s, raw| {
            s.port = parse_port(raw)?;
            Ok(())
        },
        check: |s| {
            if s.port == 0 {
                return Err("must be between 1 and 65535, got 0".to_string());
            }
            Ok(())
        },
        render: |s| s.port.to_string(),
    },
];

/// Environment variable names recognized by the loader, in schema order.
pub fn known_keys() -> impl Iterator<Item = &'static str> {
    FIELDS.iter().map(|field| field.key)
}

/// One line of the redacted configuration summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryEntry {
    pub key: &'static str,
    pub kind: FieldKind,
    pub value: String,
}

impl Settings {
    /// Every field with its effective value; secret fields are redacted.
    pub fn redacted_summary(&self) -> Vec<SummaryEntry> {
        FIELDS
            .iter()
            .map(|field| SummaryEntry {
                key: field.key,
                kind: field.kind,
                value: (field.render)(self),
            })
            .collect()
    }

    /// Run every constraint check against this record.
    ///
    /// The loader already does this; it is exposed for records assembled by hand
    /// (for example in tests of downstream components).
    pub fn check_constraints(&self) -> Result<(), Vec<(&'static str, String)>> {
        let failures: Vec<(&'static str, String)> = FIELDS
            .iter()
            .filter_map(|field| (field.check)(self).err().map(|msg| (field.key, msg)))
            .collect();
        if failures.is_empty() {
            Ok(())
        } else {
            Err(failures)
        }
    }
}
