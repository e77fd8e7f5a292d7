// Interprets the host-supplied authorization verdict

use crate::core::errors::AdminError;
use crate::core::models::AuthorizationVerdict;

/// Stops the request before any cache work unless the verdict is `Allowed`
pub struct AuthorizationGate;

impl AuthorizationGate {
    /// A missing verdict means the host never authorized the request
    pub fn check(verdict: Option<AuthorizationVerdict>) -> Result<(), AdminError> {
        match verdict {
            Some(AuthorizationVerdict::Allowed) => Ok(()),
            Some(AuthorizationVerdict::Denied) => Err(AdminError::Denied),
            Some(AuthorizationVerdict::Unauthenticated) | None => {
                Err(AdminError::Unauthenticated)
            }
        }
    }
}
