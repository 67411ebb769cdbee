//! HTTP surface of the Movescrow API.
//!
//! Responsibilities:
//! - Build the axum router from a validated, shared [`Settings`] record.
//! - Mount externally supplied feature routers under the configured prefix.
//! - Serve the router until a shutdown signal arrives.
//!
//! Does NOT handle:
//! - Loading configuration (see `movescrow-config`).
//! - Feature endpoints (waitlist, payments, realtime); callers pass their routers in.
//!
//! Invariants:
//! - `Settings` is read-only after startup and shared as `Arc<Settings>`.
//!
//! [`Settings`]: movescrow_config::Settings

pub mod app;
pub mod routes;

pub use app::{AppState, build_router, cors_layer, serve, shutdown_signal};
