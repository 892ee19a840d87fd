//! Caller identity and the usage-quota seam.
//!
//! Accounts, counters and billing live outside this service. The pipeline only
//! needs to know who is calling and whether they may run another improvement.

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::errors::AppError;

pub const USER_ID_HEADER: &str = "x-user-id";

/// Identity forwarded by the auth layer in front of this service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Caller {
    /// `None` for anonymous callers.
    pub user_id: Option<Uuid>,
}

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(raw) = parts.headers.get(USER_ID_HEADER) else {
            return Ok(Caller::default());
        };
        let user_id = raw
            .to_str()
            .ok()
            .and_then(|s| Uuid::parse_str(s.trim()).ok())
            .ok_or(AppError::Unauthorized)?;
        Ok(Caller {
            user_id: Some(user_id),
        })
    }
}

/// Answers the quota question for a caller.
///
/// Carried in `AppState` as `Arc<dyn UsageGate>`.
#[async_trait]
pub trait UsageGate: Send + Sync {
    async fn allows(&self, caller: &Caller) -> Result<bool, AppError>;
}

/// Lets every caller through.
pub struct Unmetered;

#[async_trait]
impl UsageGate for Unmetered {
    async fn allows(&self, _caller: &Caller) -> Result<bool, AppError> {
        Ok(true)
    }
}
