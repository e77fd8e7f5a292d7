// Request handlers: the admin layer itself plus the host routes

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use std::time::Duration;
use tracing::{debug, warn};

use crate::api::metrics::SUCCESS_RESULT;
use crate::api::middleware::INTERNAL_ERROR_BODY;
use crate::api::responses::{tokens_response, HealthResponse};
use crate::api::router::Dispatch;
use crate::api::AppState;
use crate::auth::audit_logger::{AdminEvent, AuditContext};
use crate::core::models::AdminRequest;

/// Admin layer entry point
///
/// Applied with `from_fn_with_state` around the rest of the host pipeline.
/// Requests for any path other than the admin path go straight to `next`
/// with no logging, metrics or cache access.
///
/// Request flow for the admin path:
/// 1. Feature flag (503 when off)
/// 2. Authorization verdict from request extensions (401/403)
/// 3. Method must be DELETE (405)
/// 4. `X-Delete-Token` present and non-empty (400)
/// 5. Token invalidation against the cache (204/404/500)
pub async fn sw_admin_middleware(
    State(app_state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let dispatch = app_state
        .request_router
        .dispatch(&AdminRequest::from_request(&request));

    let mut target = None;
    let result = match dispatch {
        Dispatch::Passthrough => return next.run(request).await,
        Dispatch::Reject(err) => Err(err),
        Dispatch::Invalidate(identity) => {
            debug!(identity = %identity, "Invalidating cached tokens");
            let outcome = app_state.invalidator.invalidate(&identity).await;
            target = Some(identity.to_string());
            outcome.into_result()
        }
    };

    let mut ctx = audit_context(request.headers());
    ctx.identity = target;

    match &result {
        Ok(()) => {
            app_state.metrics.record(SUCCESS_RESULT);
            app_state
                .audit_logger
                .log_admin_event(AdminEvent::TokensDeleted, &ctx);
        }
        Err(err) => {
            app_state.metrics.record(err.kind());
            app_state
                .audit_logger
                .log_admin_event(AdminEvent::Rejected(err), &ctx);
        }
    }

    tokens_response(result)
}

/// Caller details for the audit trail; request id is taken or generated
fn audit_context(headers: &HeaderMap) -> AuditContext {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
    };

    AuditContext {
        request_id: header("x-request-id")
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
        identity: None,
        ip_address: header("X-Forwarded-For").or_else(|| header("X-Real-IP")),
        user_agent: header("User-Agent"),
    }
}

/// Health check handler
///
/// GET /health
///
/// Cache ping is bounded to 500ms; a slow or failing cache is reported in the
/// body but the endpoint itself stays 200.
pub async fn health_handler(State(app_state): State<AppState>) -> Json<HealthResponse> {
    let cache_status = match tokio::time::timeout(
        Duration::from_millis(500),
        app_state.cache.ping(),
    )
    .await
    {
        Ok(Ok(())) => "connected".to_string(),
        Ok(Err(e)) => {
            warn!(error = %e, "Cache ping failed");
            "degraded: ping failed".to_string()
        }
        Err(_) => {
            debug!("Cache ping timed out in health check");
            "degraded: timeout".to_string()
        }
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        cache: cache_status,
        sw_admin_enabled: app_state.request_router.feature().enabled,
    })
}

/// GET /metrics
///
/// Returns Prometheus metrics in text format
pub async fn metrics_handler(State(app_state): State<AppState>) -> Response {
    match app_state.metrics.render() {
        Ok(text) => text.into_response(),
        Err(e) => {
            warn!(error = %e, "Failed to render metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY).into_response()
        }
    }
}

/// Downstream fallback for every other path
pub async fn not_found_handler() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found")
}
