// Response mapping: outcome / error kind -> status + plain-text body

use axum::{
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::core::errors::AdminError;
use crate::core::models::InvalidationOutcome;

pub const DELETED_TOKENS_BODY: &str = "Deleted Tokens";

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub cache: String,
    pub sw_admin_enabled: bool,
}

/// Non-standard header advertised alongside `Allow` on 405
pub const ALLOWED_HEADER: HeaderName = HeaderName::from_static("allowed");

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, self.user_message()).into_response();

        if let AdminError::UnsupportedMethod(_) = self {
            let headers = response.headers_mut();
            headers.insert(ALLOWED_HEADER, HeaderValue::from_static("DELETE"));
            headers.insert(header::ALLOW, HeaderValue::from_static("DELETE"));
        }

        response
    }
}

impl IntoResponse for InvalidationOutcome {
    fn into_response(self) -> Response {
        tokens_response(self.into_result())
    }
}

/// 204 "Deleted Tokens" on success, the error mapping otherwise
pub fn tokens_response(result: Result<(), AdminError>) -> Response {
    match result {
        Ok(()) => (StatusCode::NO_CONTENT, DELETED_TOKENS_BODY).into_response(),
        Err(err) => err.into_response(),
    }
}
