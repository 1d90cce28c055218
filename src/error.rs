/******************************************************************************
    Author: Joaquín Béjar García
    Email: jb@taunais.com
    Date: 18/10/26
 ******************************************************************************/
use crate::application::models::service::AccountService;
use thiserror::Error;

pub type ReloadResult<T> = Result<T, ReloadError>;

/// Failures surfaced by a reload.
///
/// The dispatcher never builds the adapter-side variants itself: whatever an
/// adapter returns reaches the caller as-is, so account-level recovery can
/// match on it (flag the account unreachable, force a fresh login, ...).
#[derive(Debug, Error)]
pub enum ReloadError {
    #[error("no adapter available for service {service}")]
    AdapterUnavailable { service: AccountService },

    #[error("failed to load adapter for service {service}: {reason}")]
    AdapterLoad {
        service: AccountService,
        reason: String,
    },

    #[error("network error: {0}")]
    Network(String),

    #[error("bad credentials")]
    BadCredentials,

    #[error("session expired")]
    SessionExpired,

    #[error("{service} provider error: {message}")]
    Provider {
        service: AccountService,
        message: String,
    },

    #[error("invalid credentials payload: {0}")]
    InvalidCredentials(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("service mismatch: expected {expected}, found {found}")]
    ServiceMismatch {
        expected: AccountService,
        found: AccountService,
    },
}

impl ReloadError {
    pub fn provider(service: AccountService, message: impl Into<String>) -> Self {
        ReloadError::Provider {
            service,
            message: message.into(),
        }
    }

    pub fn load(service: AccountService, reason: impl Into<String>) -> Self {
        ReloadError::AdapterLoad {
            service,
            reason: reason.into(),
        }
    }

    /// True when the stored credential can no longer be used and the user
    /// has to log in again.
    pub fn requires_login(&self) -> bool {
        matches!(self, ReloadError::BadCredentials | ReloadError::SessionExpired)
    }
}
