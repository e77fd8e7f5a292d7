// Middleware stack: tracing, body limit, timeout and panic recovery

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    BoxError,
};
use std::any::Any;
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::error;

/// Generic body for any failure outside the admin error taxonomy
pub const INTERNAL_ERROR_BODY: &str = "Internal server error";

/// Per-request spans (method, path, status, latency)
pub fn tracing_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
}

/// Admin requests carry no body; anything larger than the limit gets 413
pub fn body_size_limit_layer(limit: usize) -> RequestBodyLimitLayer {
    RequestBodyLimitLayer::new(limit)
}

/// Convert errors from fallible layers (request timeout) into the generic 500
pub async fn handle_middleware_error(err: BoxError) -> Response {
    if err.is::<tower::timeout::error::Elapsed>() {
        error!("Request exceeded global timeout");
    } else {
        error!(error = %err, "Unhandled middleware error");
    }
    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY).into_response()
}

/// Panic recovery for `CatchPanicLayer::custom`
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!(panic = %detail, "Request handler panicked");
    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY).into_response()
}
