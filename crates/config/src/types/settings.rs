//! The process-wide settings record.
//!
//! Responsibilities:
//! - Define `Settings`, the immutable configuration snapshot shared by every component.
//! - Provide compiled-in defaults via `Default`.
//! - Provide derived accessors (token TTL, gateway toggles, bind address).
//!
//! Does NOT handle:
//! - Reading files or the environment (see `loader` module).
//! - Field validation (see `loader::schema`).
//!
//! Invariants:
//! - Secret fields are `SecretString` and are redacted in `Debug` output.
//! - `Settings::default()` passes validation while `debug` is true.
//! - Equality compares secrets by value so two loads can be checked field-for-field.

use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

use super::algorithm::SigningAlgorithm;
use crate::constants::{
    DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES, DEFAULT_ALLOWED_ORIGINS, DEFAULT_API_PREFIX,
    DEFAULT_DATABASE_URL, DEFAULT_DEBUG, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_PROJECT_NAME,
    DEFAULT_SECRET_KEY, DEFAULT_VERSION, DEFAULT_WEBSOCKET_URL,
};

/// Validated application settings.
///
/// Constructed once at startup by [`crate::ConfigLoader`] and then shared
/// read-only (typically as `Arc<Settings>`) with every consumer.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Prefix under which feature routers are mounted (e.g. `/api/v1`).
    pub api_prefix: String,
    pub project_name: String,
    pub version: String,
    /// Development mode. Production is `debug == false`.
    pub debug: bool,

    /// Database connection URI. Contains credentials.
    pub database_url: SecretString,

    /// Token signing secret.
    pub secret_key: SecretString,
    pub algorithm: SigningAlgorithm,
    pub access_token_expire_minutes: i64,

    /// CORS allow-list, in the order it was configured.
    pub allowed_origins: Vec<String>,

    // Payment gateways. Empty means the integration is disabled.
    pub paystack_secret_key: SecretString,
    pub paystack_public_key: SecretString,
    pub flutterwave_secret_key: SecretString,
    pub flutterwave_public_key: SecretString,

    pub websocket_url: String,

    /// Bind address for the HTTP server.
    pub host: String,
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            project_name: DEFAULT_PROJECT_NAME.to_string(),
            version: DEFAULT_VERSION.to_string(),
            debug: DEFAULT_DEBUG,
            database_url: secret(DEFAULT_DATABASE_URL),
            secret_key: secret(DEFAULT_SECRET_KEY),
            algorithm: SigningAlgorithm::default(),
            access_token_expire_minutes: DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|origin| origin.to_string())
                .collect(),
            paystack_secret_key: secret(""),
            paystack_public_key: secret(""),
            flutterwave_secret_key: secret(""),
            flutterwave_public_key: secret(""),
            websocket_url: DEFAULT_WEBSOCKET_URL.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl PartialEq for Settings {
    fn eq(&self, other: &Self) -> bool {
        self.api_prefix == other.api_prefix
            && self.project_name == other.project_name
            && self.version == other.version
            && self.debug == other.debug
            && same_secret(&self.database_url, &other.database_url)
            && same_secret(&self.secret_key, &other.secret_key)
            && self.algorithm == other.algorithm
            && self.access_token_expire_minutes == other.access_token_expire_minutes
            && self.allowed_origins == other.allowed_origins
            && same_secret(&self.paystack_secret_key, &other.paystack_secret_key)
            && same_secret(&self.paystack_public_key, &other.paystack_public_key)
            && same_secret(&self.flutterwave_secret_key, &other.flutterwave_secret_key)
            && same_secret(&self.flutterwave_public_key, &other.flutterwave_public_key)
            && self.websocket_url == other.websocket_url
            && self.host == other.host
            && self.port == other.port
    }
}

impl Settings {
    /// Production is any run with `DEBUG` disabled.
    pub fn is_production(&self) -> bool {
        !self.debug
    }

    /// Access token lifetime.
    ///
    /// Validation guarantees `access_token_expire_minutes > 0`; a record built
    /// by hand with a non-positive value yields a zero duration.
    pub fn access_token_ttl(&self) -> Duration {
        let minutes = u64::try_from(self.access_token_expire_minutes).unwrap_or(0);
        Duration::from_secs(minutes.saturating_mul(60))
    }

    /// Paystack is enabled only when both keys are configured.
    pub fn paystack_enabled(&self) -> bool {
        !self.paystack_secret_key.expose_secret().is_empty()
            && !self.paystack_public_key.expose_secret().is_empty()
    }

    /// Flutterwave is enabled only when both keys are configured.
    pub fn flutterwave_enabled(&self) -> bool {
        !self.flutterwave_secret_key.expose_secret().is_empty()
            && !self.flutterwave_public_key.expose_secret().is_empty()
    }

    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_addr(&self) -> String {
        if self.host.contains(':') {
            // IPv6 literal
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

pub(crate) fn secret(value: &str) -> SecretString {
    SecretString::new(value.to_string().into())
}

fn same_secret(a: &SecretString, b: &SecretString) -> bool {
    a.expose_secret() == b.expose_secret()
}
