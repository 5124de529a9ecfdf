use thiserror::Error;

use crate::privilege::CallerIdentity;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("identity query failed: {0}")]
    QueryFailed(String),

    #[error("malformed identity response: {0}")]
    Malformed(String),
}

/// Single request/response identity query against the host.
///
/// Issued at most once per widget instance; any failure is treated as "not
/// privileged" by the caller.
#[async_trait::async_trait]
pub trait IdentityPort: Send + Sync {
    async fn current_caller(&self) -> Result<CallerIdentity, IdentityError>;
}
