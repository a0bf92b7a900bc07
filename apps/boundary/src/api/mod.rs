//! # HTTP API
//!
//! axum server exposing tenant floor-scope records and boundary resolution.
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | PUT | `/api/tenant-floor-scope` | upsert a scope record |
//! | GET | `/api/tenant-floor-scope?propertyId=&tenantAccountId=` | fetch a scope record |
//! | GET | `/api/tenant-floor-scope/{propertyId}` | list a property's scope records |
//! | POST | `/api/boundary/resolve` | resolve systems for a tenant |
//! | GET | `/health` | liveness |

pub mod error;
pub mod health;
pub mod resolve;
pub mod scope;

use crate::config::{ServerConfig, StoreLocation};
use axum::Router;
use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use boundary_core::{RedbScopeStore, ScopeStore, StoreError};
use error::ApiError;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub const SCOPE_PATH: &str = "/api/tenant-floor-scope";
pub const SCOPE_LIST_PATH: &str = "/api/tenant-floor-scope/{property_id}";
pub const RESOLVE_PATH: &str = "/api/boundary/resolve";
pub const HEALTH_PATH: &str = "/health";

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ScopeStore>,
    pub limiter: Option<Arc<DefaultDirectRateLimiter>>,
}

impl AppState {
    pub fn new(store: Arc<dyn ScopeStore>) -> Self {
        Self {
            store,
            limiter: None,
        }
    }

    /// Allow at most `per_second` requests per second across all clients.
    #[must_use]
    pub fn with_rate_limit(mut self, per_second: NonZeroU32) -> Self {
        self.limiter = Some(Arc::new(RateLimiter::direct(Quota::per_second(per_second))));
        self
    }
}

/// Open the configured scope store.
///
/// Called once at startup; a failure here is fatal to the server.
pub fn open_store(location: &StoreLocation) -> Result<Arc<dyn ScopeStore>, StoreError> {
    let store = match location {
        StoreLocation::File(path) => RedbScopeStore::open(path)?,
        StoreLocation::InMemory => RedbScopeStore::in_memory()?,
    };
    Ok(Arc::new(store))
}

async fn rate_limit(
    State(limiter): State<Arc<DefaultDirectRateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    if limiter.check().is_err() {
        tracing::warn!(path = %request.uri().path(), "rate limit exceeded");
        return ApiError::RateLimited.into_response();
    }
    next.run(request).await
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let limiter = state.limiter.clone();

    let mut app = Router::new()
        .route(SCOPE_PATH, put(scope::put_scope).get(scope::get_scope))
        .route(SCOPE_LIST_PATH, get(scope::list_scopes))
        .route(RESOLVE_PATH, post(resolve::resolve))
        .route(HEALTH_PATH, get(health::health))
        .with_state(state);

    if let Some(limiter) = limiter {
        app = app.layer(middleware::from_fn_with_state(limiter, rate_limit));
    }

    app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    )
}

/// Open the store, bind, and serve until Ctrl-C.
pub async fn serve(config: ServerConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let store = open_store(&config.store)?;
    tracing::info!(store = ?config.store, "scope store opened");

    let mut state = AppState::new(store);
    if let Some(per_second) = config.rate_limit {
        state = state.with_rate_limit(per_second);
    }

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!("boundary server listening on {}", config.bind_address());

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("boundary server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
