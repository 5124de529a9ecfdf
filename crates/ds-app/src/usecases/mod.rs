//! Use cases, one module per operation the controller can dispatch.

pub mod add_entry;
pub mod assign_box;
pub mod remove_entry;
pub mod resolve_privilege;
pub mod subscription;


pub use add_entry::{AddEntry, AddEntryError};
pub use assign_box::{AssignBox, AssignBoxError};
pub use remove_entry::{RemoveEntry, RemoveEntryError, RemoveRequest};
pub use resolve_privilege::ResolvePrivilege;
pub use subscription::{EnsureSubscription, ReleaseSubscription};

use thiserror::Error;

/// Malformed user input, rejected locally before any network call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("fill at least one of: external id, title, or secondary code")]
    MissingIdentity,

    #[error("box number must be a non-negative whole number, got {0:?}")]
    InvalidBoxNumber(String),
}
