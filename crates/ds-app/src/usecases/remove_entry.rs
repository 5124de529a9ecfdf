use std::sync::Arc;

use ds_core::library::EntryKey;
use ds_core::ports::{CommandError, InteractionPort, LibraryCommandPort};
use ds_core::ViewModel;
use thiserror::Error;
use tracing::{debug, error, warn};

#[derive(Debug, Error)]
pub enum RemoveEntryError {
    #[error(transparent)]
    Remote(#[from] CommandError),
}

/// What the user asked for, after the confirmation gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveRequest {
    Confirmed,
    Cancelled,
}

/// Use case for removing one entry from the collection.
///
/// Destructive, so it always confirms first. Removal addresses the entry
/// by its best identifier; a record with no identity at all is removed by
/// its snapshot position instead, which is a distinct remote operation.
/// When an identity-based removal fails, one positional fallback is
/// attempted before giving up.
///
/// Never optimistic: the displayed collection only changes when the
/// provider pushes the post-removal snapshot.
pub struct RemoveEntry {
    commands: Arc<dyn LibraryCommandPort>,
    interaction: Arc<dyn InteractionPort>,
}

impl RemoveEntry {
    pub fn new(
        commands: Arc<dyn LibraryCommandPort>,
        interaction: Arc<dyn InteractionPort>,
    ) -> Self {
        Self {
            commands,
            interaction,
        }
    }

    pub async fn execute(&self, model: &ViewModel) -> Result<RemoveRequest, RemoveEntryError> {
        if !self.interaction.confirm(&confirm_message(model)).await {
            debug!(title = %model.display_title(), "removal cancelled");
            return Ok(RemoveRequest::Cancelled);
        }

        let key = EntryKey::for_model(model);
        let result = match &key {
            EntryKey::Position(index) => self.commands.remove_at(*index).await,
            identity => match self.commands.remove_entry(identity).await {
                Ok(()) => Ok(()),
                Err(err) => {
                    // One shot at removal by position before surfacing.
                    warn!(%err, ?key, "identity removal failed, falling back to position");
                    self.commands.remove_at(model.original_index).await
                }
            },
        };

        match result {
            Ok(()) => {
                debug!(?key, "entry removed");
                Ok(RemoveRequest::Confirmed)
            }
            Err(err) => {
                error!(%err, ?key, "removal failed");
                self.interaction
                    .notify_error("Failed to remove the entry.")
                    .await;
                Err(err.into())
            }
        }
    }
}

fn confirm_message(model: &ViewModel) -> String {
    if model.year.is_empty() {
        format!("Delete \"{}\"?", model.display_title())
    } else {
        format!("Delete \"{} ({})\"?", model.display_title(), model.year)
    }
}
