// Domain error types - closed taxonomy with no information disclosure

use axum::http::Method;
use std::time::Duration;
use thiserror::Error;

use crate::core::models::Identity;

/// Every way an admin request can end without a successful invalidation
#[derive(Error, Debug)]
pub enum AdminError {
    /// Admin path hit while the feature flag is off (HTTP 503)
    #[error("Feature disabled by admin")]
    FeatureDisabled,

    /// No authorization verdict, or the caller could not be authenticated (HTTP 401)
    #[error("Unauthenticated")]
    Unauthenticated,

    /// Authorization layer denied the caller (HTTP 403)
    #[error("Denied by authorization")]
    Denied,

    /// Required identity header missing or empty (HTTP 400)
    #[error("Missing required header/value")]
    MissingIdentity,

    /// Anything other than DELETE on the admin path (HTTP 405)
    #[error("Request method {0} is not supported")]
    UnsupportedMethod(Method),

    /// Identity key did not resolve in the cache (HTTP 404)
    #[error("Identity not found: {0}")]
    NotFound(Identity),

    /// Cache service failure, including timeouts (HTTP 500)
    #[error("Transient failure: {0}")]
    TransientFailure(#[from] CacheError),
}

/// Cache collaborator errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Operation did not finish within the configured bound
    #[error("Cache {operation} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    /// Cache service returned an error
    #[error("Cache backend error: {0}")]
    Backend(String),

    /// Connection could not be established
    #[error("Cache connection error: {0}")]
    Connection(String),

    /// Delete completed but the cache reported nothing removed
    #[error("Delete of {0} was not acknowledged")]
    NotAcknowledged(String),
}

/// Startup configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {key} value '{value}': {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// Failures while assembling the shared application state
#[derive(Error, Debug)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to create metrics registry: {0}")]
    Metrics(#[from] prometheus::Error),
}

impl AdminError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            AdminError::FeatureDisabled => 503,
            AdminError::Unauthenticated => 401,
            AdminError::Denied => 403,
            AdminError::MissingIdentity => 400,
            AdminError::UnsupportedMethod(_) => 405,
            AdminError::NotFound(_) => 404,
            AdminError::TransientFailure(_) => 500,
        }
    }

    /// Plain-text body returned to the caller (no internal detail)
    pub fn user_message(&self) -> String {
        match self {
            AdminError::FeatureDisabled => "FEATURE DISABLED BY ADMIN".to_string(),
            AdminError::Unauthenticated => "Unauthorized".to_string(),
            AdminError::Denied => "Forbidden".to_string(),
            AdminError::MissingIdentity => {
                "DELETE request is missing required header/value".to_string()
            }
            AdminError::UnsupportedMethod(method) => {
                format!("Request method {} is not supported", method)
            }
            AdminError::NotFound(identity) => {
                format!("Invalid Name/User does not exist: {}", identity)
            }
            AdminError::TransientFailure(_) => "Internal server error".to_string(),
        }
    }

    /// Stable label used for metrics and audit events
    pub fn kind(&self) -> &'static str {
        match self {
            AdminError::FeatureDisabled => "feature_disabled",
            AdminError::Unauthenticated => "unauthenticated",
            AdminError::Denied => "denied",
            AdminError::MissingIdentity => "validation_error",
            AdminError::UnsupportedMethod(_) => "unsupported_method",
            AdminError::NotFound(_) => "not_found",
            AdminError::TransientFailure(_) => "transient_failure",
        }
    }
}
