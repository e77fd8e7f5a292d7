// Admin request dispatch: path -> feature flag -> authorization -> method -> header

use axum::http::Method;
use std::sync::Arc;

use crate::auth::gate::AuthorizationGate;
use crate::config::FeatureConfig;
use crate::core::errors::AdminError;
use crate::core::models::{AdminRequest, Identity};

/// The single path served by the admin layer (exact match)
pub const ADMIN_PATH: &str = "/sw_admin";

/// Header carrying the `<account>:<user>` whose tokens get deleted
pub const DELETE_TOKEN_HEADER: &str = "X-Delete-Token";

/// First-stage routing decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    NotAdminPath,
    FeatureDisabled,
    Admin,
}

/// What the admin layer does with a request
#[derive(Debug)]
pub enum Dispatch {
    /// Hand the request to the rest of the host pipeline untouched
    Passthrough,
    /// Terminal error response, no cache interaction
    Reject(AdminError),
    /// Invalidate the cached tokens of this identity
    Invalidate(Identity),
}

pub struct RequestRouter {
    feature: Arc<FeatureConfig>,
}

impl RequestRouter {
    pub fn new(feature: Arc<FeatureConfig>) -> Self {
        Self { feature }
    }

    pub fn feature(&self) -> &FeatureConfig {
        &self.feature
    }

    /// Path and feature flag only; non-admin paths never see the flag
    pub fn route(&self, request: &AdminRequest<'_>) -> Route {
        if request.path != ADMIN_PATH {
            Route::NotAdminPath
        } else if !self.feature.enabled {
            Route::FeatureDisabled
        } else {
            Route::Admin
        }
    }

    /// Full decision, evaluated in a fixed order so the result is total
    pub fn dispatch(&self, request: &AdminRequest<'_>) -> Dispatch {
        match self.route(request) {
            Route::NotAdminPath => Dispatch::Passthrough,
            Route::FeatureDisabled => Dispatch::Reject(AdminError::FeatureDisabled),
            Route::Admin => match AuthorizationGate::check(request.verdict)
                .and_then(|()| AdminCall::identity(request))
            {
                Ok(identity) => Dispatch::Invalidate(identity),
                Err(err) => Dispatch::Reject(err),
            },
        }
    }
}

/// Method and header validation for an authorized admin request
pub struct AdminCall;

impl AdminCall {
    pub fn identity(request: &AdminRequest<'_>) -> Result<Identity, AdminError> {
        if request.method != Method::DELETE {
            return Err(AdminError::UnsupportedMethod(request.method.clone()));
        }
        request
            .header(DELETE_TOKEN_HEADER)
            .and_then(Identity::parse)
            .ok_or(AdminError::MissingIdentity)
    }
}
