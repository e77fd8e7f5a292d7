// Cache key derivation

use std::fmt;

use crate::core::models::Identity;

/// Entity namespace inside a reseller prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Token,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::User => "user",
            EntityKind::Token => "token",
        }
    }
}

/// Fully composed cache key: `<prefix>/<kind>/<id>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(prefix: &str, kind: EntityKind, id: &str) -> Self {
        Self(format!("{}/{}/{}", prefix, kind.as_str(), id))
    }

    /// Key holding the token value cached for an identity
    pub fn identity(prefix: &str, identity: &Identity) -> Self {
        Self::new(prefix, EntityKind::User, identity.as_str())
    }

    /// Key holding the cached auth data for a token value
    pub fn token(prefix: &str, token: &str) -> Self {
        Self::new(prefix, EntityKind::Token, token)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
