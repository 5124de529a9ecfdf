use serde_json::Value;
use thiserror::Error;

use crate::ids::ResourceId;

#[derive(Debug, Error)]
pub enum HostStateError {
    #[error("unknown resource: {0}")]
    UnknownResource(ResourceId),

    #[error("host state unavailable: {0}")]
    Unavailable(String),
}

/// Read side of the host-managed keyed store.
///
/// The widget only ever reads this store; all mutation goes through
/// [`LibraryCommandPort`](super::LibraryCommandPort) and comes back as a
/// fresh snapshot.
#[async_trait::async_trait]
pub trait HostStatePort: Send + Sync {
    /// Current ordered snapshot of the collection's raw records.
    async fn collection(&self, resource: &ResourceId) -> Result<Vec<Value>, HostStateError>;
}
