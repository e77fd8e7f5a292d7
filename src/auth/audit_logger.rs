// Security event logging for admin requests

use tracing::{error, info, warn};

use crate::core::errors::AdminError;

/// Outcome of one admin request, as recorded in the audit trail
#[derive(Debug)]
pub enum AdminEvent<'a> {
    TokensDeleted,
    Rejected(&'a AdminError),
}

/// Caller context attached to every audit event
#[derive(Debug, Default, Clone)]
pub struct AuditContext {
    pub request_id: String,
    pub identity: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Audit logger for admin endpoint events
///
/// Events go through `tracing` only. Cache failures are logged at `error`
/// with their cause so they stay distinguishable from a plain not-found.
#[derive(Debug, Default)]
pub struct AuditLogger;

impl AuditLogger {
    pub fn new() -> Self {
        Self
    }

    pub fn log_admin_event(&self, event: AdminEvent<'_>, ctx: &AuditContext) {
        match event {
            AdminEvent::TokensDeleted => {
                info!(
                    request_id = %ctx.request_id,
                    identity = ?ctx.identity,
                    ip_address = ?ctx.ip_address,
                    user_agent = ?ctx.user_agent,
                    "Cached tokens deleted"
                );
            }
            AdminEvent::Rejected(AdminError::TransientFailure(cause)) => {
                error!(
                    request_id = %ctx.request_id,
                    identity = ?ctx.identity,
                    ip_address = ?ctx.ip_address,
                    error = %cause,
                    "Token invalidation failed on cache service"
                );
            }
            AdminEvent::Rejected(err) => {
                warn!(
                    request_id = %ctx.request_id,
                    identity = ?ctx.identity,
                    ip_address = ?ctx.ip_address,
                    user_agent = ?ctx.user_agent,
                    kind = err.kind(),
                    status = err.status_code(),
                    "Admin request rejected"
                );
            }
        }
    }
}
