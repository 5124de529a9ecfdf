//! Dependency grouping for controller construction.
//!
//! This is NOT a Builder: no build steps, no default values, no hidden
//! logic. The struct literal IS the dependency manifest: all ports must
//! be provided.

use std::sync::Arc;

use ds_core::ports::{
    EventStreamPort, HostStatePort, IdentityPort, InteractionPort, LibraryCommandPort,
    LinkOpenerPort, RenderPort,
};

/// Everything a widget instance needs from its embedding host.
pub struct WidgetDeps {
    /// Read side of the host-managed keyed store.
    pub host: Arc<dyn HostStatePort>,

    /// One-shot caller identity query.
    pub identity: Arc<dyn IdentityPort>,

    /// Push-event stream for change notifications.
    pub events: Arc<dyn EventStreamPort>,

    /// Remote mutating operations on the collection.
    pub commands: Arc<dyn LibraryCommandPort>,

    /// Confirmations, prompts, and failure notices.
    pub interaction: Arc<dyn InteractionPort>,

    /// External link opening for the short-press action.
    pub links: Arc<dyn LinkOpenerPort>,

    /// The collaborator that turns frames into markup.
    pub renderer: Arc<dyn RenderPort>,
}
