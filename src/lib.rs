//! # dvdshelf
//!
//! Embedding shell for the DVD Shelf widget: widget-type registration,
//! dependency wiring, and the activation entry point the host calls.
//!
//! The heavy lifting lives in the workspace crates: `ds-core` (domain and
//! ports), `ds-app` (controller and use cases), `ds-infra` (adapters). This
//! crate only assembles them.

pub mod registry;

use std::sync::Arc;

use serde_json::Value;

use ds_app::{LibraryController, WidgetDeps};
use ds_core::config::{normalize, ConfigError};

pub use ds_app::{AddSubmission, AssignOutcome, RemoveOutcome};
pub use registry::{register_widget_type, registered_widgets, WidgetDescriptor, WIDGET_KIND};

/// One live widget instance.
///
/// Construction validates the host-supplied configuration; a missing
/// resource id aborts activation before anything renders.
pub struct ShelfWidget {
    controller: Arc<LibraryController>,
}

impl std::fmt::Debug for ShelfWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShelfWidget").finish_non_exhaustive()
    }
}

impl ShelfWidget {
    /// Activate a widget from the host's partial configuration object.
    pub fn activate(partial: &Value, deps: WidgetDeps) -> Result<Self, ConfigError> {
        let config = normalize(partial)?;
        Ok(Self {
            controller: Arc::new(LibraryController::new(config, deps)),
        })
    }

    /// The controller, for wiring interaction callbacks.
    pub fn controller(&self) -> &Arc<LibraryController> {
        &self.controller
    }

    /// Forward a host-binding update.
    pub async fn on_host_update(&self) {
        self.controller.on_host_update().await;
    }

    /// Detach from the host. Idempotent, never throws.
    pub async fn teardown(&self) {
        self.controller.teardown().await;
    }
}
