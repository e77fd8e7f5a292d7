// Axum web server layer

use axum::{error_handling::HandleErrorLayer, middleware::from_fn_with_state, routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;

pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod responses;
pub mod router;

use crate::api::metrics::AdminMetrics;
use crate::api::router::RequestRouter;
use crate::auth::audit_logger::AuditLogger;
use crate::auth::auth_middleware::{authorization_middleware, Authorizer};
use crate::core::errors::StartupError;
use crate::engine::TokenInvalidator;
use crate::state::CacheStore;

pub use crate::config::Config;

/// Application state containing all shared dependencies
///
/// Built once at startup. The cache client inside is long-lived and shared
/// by every request; nothing here is mutated per request except the metric
/// counters.
#[derive(Clone)]
pub struct AppState {
    pub request_router: Arc<RequestRouter>,
    pub invalidator: TokenInvalidator,
    pub cache: Arc<dyn CacheStore>,
    pub audit_logger: Arc<AuditLogger>,
    pub metrics: Arc<AdminMetrics>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, cache: Arc<dyn CacheStore>) -> Result<Self, StartupError> {
        let feature = Arc::new(config.feature.clone());
        let invalidator = TokenInvalidator::new(
            cache.clone(),
            feature.default_reseller_prefix()?,
            config.cache_operation_timeout(),
        );

        Ok(Self {
            request_router: Arc::new(RequestRouter::new(feature)),
            invalidator,
            cache,
            audit_logger: Arc::new(AuditLogger::new()),
            metrics: Arc::new(AdminMetrics::new()?),
            config: Arc::new(config),
        })
    }
}

/// Routes owned by the host process, downstream of the admin layer
pub fn host_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/metrics", get(handlers::metrics_handler))
        .fallback(handlers::not_found_handler)
}

/// Wrap `downstream` with the admin layer and the common middleware
///
/// Middleware stack (outermost to innermost):
/// - Panic recovery (tower-http::catch_panic) - generic 500
/// - Tracing (tower-http::trace)
/// - Request timeout (tower::timeout) - generic 500
/// - Body size limit (tower-http::limit)
/// - Authorization verdict (only when an authorizer is given)
/// - Admin layer - `/sw_admin` handling, passthrough for everything else
///
/// Without an authorizer no verdict is attached, so every admin call is
/// answered 401 by the admin layer.
pub fn create_router(
    app_state: AppState,
    downstream: Router<AppState>,
    authorizer: Option<Arc<dyn Authorizer>>,
) -> Router {
    let mut router = downstream.layer(from_fn_with_state(
        app_state.clone(),
        handlers::sw_admin_middleware,
    ));

    if let Some(authorizer) = authorizer {
        router = router.layer(from_fn_with_state(authorizer, authorization_middleware));
    }

    let timeout = Duration::from_secs(app_state.config.request_timeout_secs);

    router
        .layer(middleware::body_size_limit_layer(
            app_state.config.body_size_limit_bytes,
        ))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(middleware::handle_middleware_error))
                .timeout(timeout)
                .into_inner(),
        )
        .layer(middleware::tracing_layer())
        .layer(CatchPanicLayer::custom(middleware::handle_panic))
        .with_state(app_state)
}
