use std::sync::Arc;

use ds_core::library::EntryKey;
use ds_core::ports::{CommandError, InteractionPort, LibraryCommandPort};
use ds_core::ViewModel;
use thiserror::Error;
use tracing::{debug, error};

use super::ValidationError;

/// Field name the relocation edit targets on the remote service.
pub const BOX_NUMBER_FIELD: &str = "box_number";

#[derive(Debug, Error)]
pub enum AssignBoxError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Remote(#[from] CommandError),
}

/// Use case for assigning a storage-slot number to one entry.
///
/// The value must look like a non-negative whole number; anything else is
/// rejected locally. The view model is never mutated here; the updated
/// slot arrives with the next provider snapshot.
pub struct AssignBox {
    commands: Arc<dyn LibraryCommandPort>,
    interaction: Arc<dyn InteractionPort>,
}

impl AssignBox {
    pub fn new(
        commands: Arc<dyn LibraryCommandPort>,
        interaction: Arc<dyn InteractionPort>,
    ) -> Self {
        Self {
            commands,
            interaction,
        }
    }

    pub async fn execute(&self, model: &ViewModel, value: &str) -> Result<(), AssignBoxError> {
        let value = value.trim();
        if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
            let err = ValidationError::InvalidBoxNumber(value.to_string());
            self.interaction.notify_error(&err.to_string()).await;
            return Err(err.into());
        }

        let key = EntryKey::for_model(model);
        match self.commands.set_field(&key, BOX_NUMBER_FIELD, value).await {
            Ok(()) => {
                debug!(?key, value, "box number assigned");
                Ok(())
            }
            Err(err) => {
                error!(%err, ?key, "box assignment failed");
                self.interaction
                    .notify_error("Failed to update the box number.")
                    .await;
                Err(err.into())
            }
        }
    }
}
