//! # ds-app
//!
//! Application layer for the DVD Shelf widget: the live collection
//! controller, its dependency grouping, and one use case per operation.
//!
//! Everything here talks to the embedding host exclusively through the
//! port traits in `ds-core`.

pub mod controller;
pub mod deps;
pub mod usecases;

pub use controller::{AddSubmission, AssignOutcome, LibraryController, RemoveOutcome};
pub use deps::WidgetDeps;
