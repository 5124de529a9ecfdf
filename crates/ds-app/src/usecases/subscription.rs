use std::sync::Arc;

use ds_core::ids::SubscriptionId;
use ds_core::ports::{EventStreamPort, EventSubscription, CATEGORY_STATE_CHANGED};
use tracing::{debug, info, warn};

/// Use case for acquiring the change-event subscription.
///
/// Failure is non-fatal: the widget degrades to host-binding-driven
/// refresh and a later trigger may try again, since no handle was stored.
pub struct EnsureSubscription {
    events: Arc<dyn EventStreamPort>,
}

impl EnsureSubscription {
    pub fn new(events: Arc<dyn EventStreamPort>) -> Self {
        Self { events }
    }

    pub async fn execute(&self) -> Option<EventSubscription> {
        match self.events.subscribe(CATEGORY_STATE_CHANGED).await {
            Ok(subscription) => {
                info!(id = %subscription.id, "subscribed to change events");
                Some(subscription)
            }
            Err(err) => {
                warn!(%err, "subscribing to change events failed");
                None
            }
        }
    }
}

/// Use case for releasing a subscription handle on teardown.
///
/// Idempotent by contract with the port, and errors raised during release
/// are swallowed: teardown must never throw.
pub struct ReleaseSubscription {
    events: Arc<dyn EventStreamPort>,
}

impl ReleaseSubscription {
    pub fn new(events: Arc<dyn EventStreamPort>) -> Self {
        Self { events }
    }

    pub async fn execute(&self, id: SubscriptionId) {
        match self.events.unsubscribe(&id).await {
            Ok(()) => debug!(%id, "subscription released"),
            Err(err) => debug!(%err, %id, "releasing subscription failed, ignoring"),
        }
    }
}
