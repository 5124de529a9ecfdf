use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::ids::{ResourceId, SubscriptionId};

/// Event category carrying collection-change notifications.
pub const CATEGORY_STATE_CHANGED: &str = "state_changed";

/// One push notification from the host's change-event stream.
///
/// The subject names the resource whose state changed; subscribers compare
/// it against their configured resource id and discard everything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateChangedEvent {
    pub subject: ResourceId,
    pub occurred_at: DateTime<Utc>,
}

/// A live subscription: the handle to release plus the channel events
/// arrive on.
#[derive(Debug)]
pub struct EventSubscription {
    pub id: SubscriptionId,
    pub events: mpsc::Receiver<StateChangedEvent>,
}

#[derive(Debug, Error)]
pub enum SubscribeError {
    #[error("subscription rejected: {0}")]
    Rejected(String),

    #[error("event stream closed")]
    StreamClosed,
}

/// Subscribe/unsubscribe interface of the host's push-event stream.
#[async_trait::async_trait]
pub trait EventStreamPort: Send + Sync {
    /// Request a subscription to one event category.
    async fn subscribe(&self, category: &str) -> Result<EventSubscription, SubscribeError>;

    /// Release a previously acquired handle. Must be idempotent: releasing
    /// an unknown or already-released handle is not an error worth
    /// propagating to callers tearing the widget down.
    async fn unsubscribe(&self, id: &SubscriptionId) -> Result<(), SubscribeError>;
}
