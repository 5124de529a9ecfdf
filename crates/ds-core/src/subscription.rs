use crate::ids::SubscriptionId;

/// Push-event subscription lifecycle.
///
/// At most one live handle per widget instance. Attaching while already
/// subscribed is a no-op; detaching hands the handle back to the caller so
/// the release can be attempted (and its errors swallowed) at the port
/// boundary.
///
/// ```text
/// Detached ──→ Subscribed ──→ Detached
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubscriptionState {
    #[default]
    Detached,
    Subscribed(SubscriptionId),
}

impl SubscriptionState {
    pub fn is_subscribed(self) -> bool {
        matches!(self, Self::Subscribed(_))
    }

    /// Store a freshly acquired handle. Returns `None` while a handle is
    /// already held; the caller must not have requested a second one.
    pub fn attach(self, id: SubscriptionId) -> Option<Self> {
        match self {
            Self::Detached => Some(Self::Subscribed(id)),
            Self::Subscribed(_) => None,
        }
    }

    /// Drop back to `Detached`, yielding the handle to release, if any.
    /// Idempotent: detaching a detached subscription yields nothing.
    pub fn detach(self) -> (Self, Option<SubscriptionId>) {
        match self {
            Self::Subscribed(id) => (Self::Detached, Some(id)),
            Self::Detached => (Self::Detached, None),
        }
    }
}
