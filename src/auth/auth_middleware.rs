// Host-side authorization: computes the verdict the admin layer reads

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::auth::api_key::{ApiKey, ApiKeyHash};
use crate::core::models::AuthorizationVerdict;

/// Header carrying the caller's own credential
pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// Decides whether a caller may use the admin endpoint
#[async_trait::async_trait]
pub trait Authorizer: Send + Sync {
    async fn authorize(&self, credential: Option<&ApiKey>) -> AuthorizationVerdict;
}

/// Authorizer backed by a fixed set of admin API key hashes
pub struct ApiKeyAuthorizer {
    admin_key_hashes: Vec<ApiKeyHash>,
}

impl ApiKeyAuthorizer {
    pub fn new(admin_key_hashes: Vec<ApiKeyHash>) -> Self {
        Self { admin_key_hashes }
    }
}

#[async_trait::async_trait]
impl Authorizer for ApiKeyAuthorizer {
    async fn authorize(&self, credential: Option<&ApiKey>) -> AuthorizationVerdict {
        let Some(credential) = credential else {
            return AuthorizationVerdict::Unauthenticated;
        };

        let presented = credential.hash();
        // no short-circuit, every configured hash is compared
        let matched = self
            .admin_key_hashes
            .iter()
            .fold(false, |found, hash| hash.matches(&presented) | found);

        if matched {
            AuthorizationVerdict::Allowed
        } else {
            AuthorizationVerdict::Denied
        }
    }
}

/// Authorization middleware function
///
/// Reads `X-Auth-Token`, asks the authorizer for a verdict and stores it in
/// the request extensions. Never rejects by itself; the admin layer decides
/// what the verdict means.
pub async fn authorization_middleware(
    State(authorizer): State<Arc<dyn Authorizer>>,
    mut request: Request,
    next: Next,
) -> Response {
    let credential = extract_credential(request.headers());
    let verdict = authorizer.authorize(credential.as_ref()).await;
    request.extensions_mut().insert(verdict);
    next.run(request).await
}

/// Extract the caller credential; empty values count as absent
fn extract_credential(headers: &HeaderMap) -> Option<ApiKey> {
    headers
        .get(AUTH_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ApiKey::new)
}
