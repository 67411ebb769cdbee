//! Router assembly, CORS policy and the serve loop.
//!
//! Responsibilities:
//! - Build the application router with the fixed endpoints and mounted features.
//! - Derive the CORS policy from `allowed_origins`.
//! - Run axum with graceful shutdown.
//!
//! Does NOT handle:
//! - Endpoint bodies (see `routes.rs`).
//! - Binding the listener; callers pass a bound `TcpListener` in.
//!
//! Invariants:
//! - `allowed_origins` is the only source of allowed CORS origins; there is no wildcard.
//! - Feature routers are reachable only under `api_prefix`.

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::get;
use movescrow_config::{Settings, normalize_origin};
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::routes;

/// State shared by every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
}

/// Build the full application router.
///
/// `features` are merged together and nested under `settings.api_prefix`.
/// A prefix of `/` mounts them at the root.
pub fn build_router(settings: Arc<Settings>, features: Vec<Router<AppState>>) -> Router {
    let state = AppState {
        settings: Arc::clone(&settings),
    };

    let mut router = Router::new()
        .route("/", get(routes::root))
        .route("/health", get(routes::health));

    if !features.is_empty() {
        let api = features
            .into_iter()
            .fold(Router::new(), |api, feature| api.merge(feature));
        let prefix = settings.api_prefix.trim_end_matches('/');
        router = if prefix.is_empty() {
            router.merge(api)
        } else {
            router.nest(prefix, api)
        };
    }

    router
        .with_state(state)
        .layer(cors_layer(&settings.allowed_origins))
        .layer(TraceLayer::new_for_http())
}

/// CORS policy allowing exactly the configured origins, with credentials.
///
/// Methods and headers are mirrored from the preflight request; wildcards
/// cannot be combined with credentials.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| {
            let normalized = normalize_origin(origin);
            if normalized.is_none() {
                tracing::warn!(origin = %origin, "skipping invalid CORS origin");
            }
            normalized
        })
        .filter_map(|origin| HeaderValue::from_str(&origin).ok())
        .collect();

    tracing::debug!(count = origins.len(), "configured CORS origins");

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

/// Serve the application on `listener` until `shutdown` resolves.
pub async fn serve<F>(settings: Arc<Settings>, listener: TcpListener, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let router = build_router(Arc::clone(&settings), Vec::new());

    tracing::info!(
        addr = %listener.local_addr()?,
        project = %settings.project_name,
        version = %settings.version,
        "HTTP server listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on Unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
