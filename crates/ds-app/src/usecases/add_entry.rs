use std::sync::Arc;

use ds_core::ports::{CommandError, InteractionPort, LibraryCommandPort, NewEntry};
use thiserror::Error;
use tracing::{debug, error};

use super::ValidationError;

#[derive(Debug, Error)]
pub enum AddEntryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Remote(#[from] CommandError),
}

/// Use case for adding one entry to the collection.
///
/// Validation happens locally: an entry with no identifying field at all is
/// rejected before any network call. Remote failures surface exactly one
/// user-visible notice; the caller keeps the entered values so nothing is
/// lost.
pub struct AddEntry {
    commands: Arc<dyn LibraryCommandPort>,
    interaction: Arc<dyn InteractionPort>,
}

impl AddEntry {
    pub fn new(
        commands: Arc<dyn LibraryCommandPort>,
        interaction: Arc<dyn InteractionPort>,
    ) -> Self {
        Self {
            commands,
            interaction,
        }
    }

    pub async fn execute(&self, entry: &NewEntry) -> Result<(), AddEntryError> {
        let entry = entry.trimmed();
        if !entry.has_identity() {
            let err = ValidationError::MissingIdentity;
            self.interaction.notify_error(&err.to_string()).await;
            return Err(err.into());
        }

        match self.commands.add_entry(&entry).await {
            Ok(()) => {
                debug!(title = %entry.title, external_id = %entry.external_id, "entry added");
                Ok(())
            }
            Err(err) => {
                error!(%err, "add entry failed");
                self.interaction
                    .notify_error("Failed to add the entry. Check the logs.")
                    .await;
                Err(err.into())
            }
        }
    }
}
