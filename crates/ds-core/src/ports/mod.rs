//! Port interfaces for the application layer
//!
//! Ports define the contract between the widget's controller logic and the
//! host runtime it is embedded in. The controller only ever sees these
//! traits; the embedding supplies the implementations (host state feed,
//! push-event stream, remote command service, user-interaction surface,
//! renderer).

pub mod event_stream;
pub mod host_state;
pub mod identity;
pub mod interaction;
pub mod library_command;
pub mod link_opener;
pub mod render;

pub use event_stream::{
    EventStreamPort, EventSubscription, StateChangedEvent, SubscribeError, CATEGORY_STATE_CHANGED,
};
pub use host_state::{HostStateError, HostStatePort};
pub use identity::{IdentityError, IdentityPort};
pub use interaction::InteractionPort;
pub use library_command::{CommandError, LibraryCommandPort, NewEntry};
pub use link_opener::LinkOpenerPort;
pub use render::{RenderFrame, RenderPort};
