//! Text coercion and value checks shared by the field schema.
//!
//! Responsibilities:
//! - Convert raw textual values into booleans, integers and origin lists.
//! - Check URI-, origin- and version-shaped strings.
//!
//! Does NOT handle:
//! - Knowing which field uses which rule (see `schema.rs`).
//! - Quoting or redacting offending values (the builder decides, per field).
//!
//! Invariants:
//! - Error strings describe the expected shape only; they never echo the input.
//!   Callers append the value when the field is not secret.

use std::net::IpAddr;
use url::Url;

/// Accepted boolean spellings (compared case-insensitively after trimming).
pub const TRUE_SPELLINGS: &[&str] = &["true", "1", "yes", "on", "t", "y"];
pub const FALSE_SPELLINGS: &[&str] = &["false", "0", "no", "off", "f", "n"];

pub(crate) fn parse_bool(raw: &str) -> Result<bool, String> {
    let normalized = raw.trim().to_ascii_lowercase();
    if TRUE_SPELLINGS.contains(&normalized.as_str()) {
        Ok(true)
    } else if FALSE_SPELLINGS.contains(&normalized.as_str()) {
        Ok(false)
    } else {
        Err("expected a boolean (true/false, 1/0, yes/no, on/off, t/f, y/n)".to_string())
    }
}

pub(crate) fn parse_i64(raw: &str) -> Result<i64, String> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| "expected a base-10 integer".to_string())
}

pub(crate) fn parse_port(raw: &str) -> Result<u16, String> {
    raw.trim()
        .parse::<u16>()
        .map_err(|_| "expected a base-10 integer between 0 and 65535".to_string())
}

/// Parse a list of strings from either a JSON array literal or a comma-separated list.
///
/// Entries are trimmed and empty entries dropped. Order and duplicates are kept.
pub(crate) fn parse_string_list(raw: &str) -> Result<Vec<String>, String> {
    let trimmed = raw.trim();

    let entries: Vec<String> = if trimmed.starts_with('[') {
        serde_json::from_str::<Vec<String>>(trimmed)
            .map_err(|_| "expected a JSON array of strings or a comma-separated list".to_string())?
    } else {
        trimmed.split(',').map(str::to_string).collect()
    };

    Ok(entries
        .into_iter()
        .map(|entry| entry.trim().to_string())
        .filter(|entry| !entry.is_empty())
        .collect())
}

/// Check that `raw` is an http(s) origin: scheme, host and optional port only.
pub(crate) fn check_origin(raw: &str) -> Result<(), String> {
    let invalid = |reason: &str| format!("\"{raw}\" is not a valid origin: {reason}");

    let parsed = Url::parse(raw).map_err(|e| invalid(&e.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if parsed.host_str().is_none() {
        return Err(invalid("host is required"));
    }
    if !parsed.username().is_empty() || parsed.password().is_some() {
        return Err(invalid("credentials are not allowed"));
    }
    if parsed.path() != "/" || parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(invalid("path, query and fragment are not allowed"));
    }
    Ok(())
}

/// Canonical `scheme://host[:port]` form of an origin, as browsers send it.
///
/// Returns `None` when `raw` is not a valid origin.
pub fn normalize_origin(raw: &str) -> Option<String> {
    check_origin(raw).ok()?;
    Url::parse(raw)
        .ok()
        .map(|parsed| parsed.origin().ascii_serialization())
}

/// Check that `raw` can be used as a literal route prefix.
///
/// Route captures (`:name`, `*rest`, `{name}`) are rejected; the router would
/// refuse to mount feature routes under them.
pub(crate) fn check_route_prefix(raw: &str) -> Result<(), String> {
    if raw.is_empty() {
        return Err("must not be empty".to_string());
    }
    if !raw.starts_with('/') {
        return Err(format!("must start with '/', got \"{raw}\""));
    }
    if raw.contains('{') || raw.contains('}') {
        return Err(format!("must not contain '{{' or '}}', got \"{raw}\""));
    }
    if raw
        .split('/')
        .any(|segment| segment.starts_with(':') || segment.starts_with('*'))
    {
        return Err(format!(
            "path segments must not start with ':' or '*', got \"{raw}\""
        ));
    }
    Ok(())
}

/// Check that `raw` parses as an absolute URI. The value is never echoed.
pub(crate) fn check_connection_uri(raw: &str) -> Result<(), String> {
    if raw.trim().is_empty() {
        return Err("must not be empty".to_string());
    }
    Url::parse(raw)
        .map(|_| ())
        .map_err(|e| format!("must be an absolute connection URI ({e})"))
}

/// Check that `raw` is a `ws://` or `wss://` URL with a host.
pub(crate) fn check_websocket_url(raw: &str) -> Result<(), String> {
    let parsed = Url::parse(raw)
        .map_err(|e| format!("\"{raw}\" must be a ws:// or wss:// URL ({e})"))?;

    if !matches!(parsed.scheme(), "ws" | "wss") {
        return Err(format!(
            "scheme must be ws or wss (e.g. ws://localhost:8000/ws), got: {}",
            parsed.scheme()
        ));
    }
    if parsed.host_str().is_none() {
        return Err("host is required (e.g. ws://localhost:8000/ws)".to_string());
    }
    Ok(())
}

/// Check that `raw` is an IP address or a hostname the listener can bind.
pub(crate) fn check_host(raw: &str) -> Result<(), String> {
    if raw.parse::<IpAddr>().is_ok() {
        return Ok(());
    }
    url::Host::parse(raw)
        .map(|_| ())
        .map_err(|e| format!("\"{raw}\" is not a valid IP address or hostname ({e})"))
}

/// Check for a `MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]` version string.
pub(crate) fn check_semver(raw: &str) -> Result<(), String> {
    let invalid = || format!("\"{raw}\" is not a semantic version (expected MAJOR.MINOR.PATCH)");

    let (rest, build) = match raw.split_once('+') {
        Some((rest, build)) => (rest, Some(build)),
        None => (raw, None),
    };
    let (core, pre) = match rest.split_once('-') {
        Some((core, pre)) => (core, Some(pre)),
        None => (rest, None),
    };

    let parts: Vec<&str> = core.split('.').collect();
    if parts.len() != 3 || !parts.iter().all(|part| is_numeric_identifier(part)) {
        return Err(invalid());
    }
    if let Some(pre) = pre {
        if !is_dotted_identifier(pre) {
            return Err(invalid());
        }
    }
    if let Some(build) = build {
        if !is_dotted_identifier(build) {
            return Err(invalid());
        }
    }
    Ok(())
}

fn is_numeric_identifier(part: &str) -> bool {
    !part.is_empty()
        && part.bytes().all(|b| b.is_ascii_digit())
        && (part == "0" || !part.starts_with('0'))
}

fn is_dotted_identifier(value: &str) -> bool {
    value.split('.').all(|ident| {
        !ident.is_empty()
            && ident
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-')
    })
}
