// Request, verdict and outcome types shared across the pipeline

use axum::extract::Request;
use axum::http::{HeaderMap, Method};
use std::fmt;

use crate::core::errors::{AdminError, CacheError};

/// Authorization decision made by the host before the admin layer runs
///
/// The admin layer never computes this; it only reads it from the request
/// extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationVerdict {
    Allowed,
    Denied,
    Unauthenticated,
}

/// Target of an invalidation, the `<account>:<user>` value of the identity header
///
/// Always non-empty. No further format checks are applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity(String);

impl Identity {
    /// Returns `None` for empty or whitespace-only input
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Immutable per-request view handed to the admin pipeline
#[derive(Debug, Clone, Copy)]
pub struct AdminRequest<'a> {
    pub path: &'a str,
    pub method: &'a Method,
    pub headers: &'a HeaderMap,
    pub verdict: Option<AuthorizationVerdict>,
}

impl<'a> AdminRequest<'a> {
    /// Borrow the parts the pipeline needs from an inbound request
    pub fn from_request(request: &'a Request) -> Self {
        Self {
            path: request.uri().path(),
            method: request.method(),
            headers: request.headers(),
            verdict: request.extensions().get::<AuthorizationVerdict>().copied(),
        }
    }

    /// Case-insensitive header lookup; non-UTF-8 values read as absent
    pub fn header(&self, name: &str) -> Option<&'a str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Result of one invalidation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidationOutcome {
    /// Identity key and token key were both removed
    Success,
    /// Identity key did not resolve; nothing was deleted
    NotFound(Identity),
    /// Cache lookup or delete failed or timed out
    TransientFailure(CacheError),
}

impl InvalidationOutcome {
    pub fn into_result(self) -> Result<(), AdminError> {
        match self {
            InvalidationOutcome::Success => Ok(()),
            InvalidationOutcome::NotFound(identity) => Err(AdminError::NotFound(identity)),
            InvalidationOutcome::TransientFailure(cause) => {
                Err(AdminError::TransientFailure(cause))
            }
        }
    }
}
