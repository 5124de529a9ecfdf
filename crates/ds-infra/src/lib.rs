//! # ds-infra
//!
//! Infrastructure adapters for the DVD Shelf widget: an in-process hub
//! implementing the host-facing ports, a file-based configuration source,
//! and headless interaction/render/link adapters for the demo binary and
//! the integration tests.

pub mod config_source;
pub mod hub;
pub mod interaction;
pub mod links;
pub mod render;

pub use config_source::FileConfigSource;
pub use hub::MemoryHub;
pub use interaction::ScriptedInteraction;
pub use links::LoggingLinkOpener;
pub use render::{LoggingRenderer, RecordingRenderer};
