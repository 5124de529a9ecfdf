use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::library::EntryKey;

/// Field values for an add-entry command, as entered by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct NewEntry {
    pub external_id: String,
    pub title: String,
    pub year: String,
    pub secondary_code: String,
    pub added_by: String,
}

impl NewEntry {
    /// Copy with every field whitespace-trimmed.
    pub fn trimmed(&self) -> Self {
        Self {
            external_id: self.external_id.trim().to_string(),
            title: self.title.trim().to_string(),
            year: self.year.trim().to_string(),
            secondary_code: self.secondary_code.trim().to_string(),
            added_by: self.added_by.trim().to_string(),
        }
    }

    /// An entry is addressable iff at least one identifying field is set.
    pub fn has_identity(&self) -> bool {
        !self.external_id.is_empty() || !self.title.is_empty() || !self.secondary_code.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("remote service rejected the command: {0}")]
    Rejected(String),

    #[error("remote service unavailable: {0}")]
    Unavailable(String),
}

/// Mutating operations against the remote collection service.
///
/// One in-flight request per user action; no batching. Note that removal
/// by identity and removal by position are distinct remote operations, not
/// two spellings of the same one.
#[async_trait::async_trait]
pub trait LibraryCommandPort: Send + Sync {
    async fn add_entry(&self, entry: &NewEntry) -> Result<(), CommandError>;

    /// Remove by identity. `key` is never [`EntryKey::Position`]; positional
    /// removal goes through [`remove_at`](Self::remove_at).
    async fn remove_entry(&self, key: &EntryKey) -> Result<(), CommandError>;

    /// Remove the record at this position in the provider snapshot.
    async fn remove_at(&self, index: usize) -> Result<(), CommandError>;

    /// Set one field on the addressed entry, e.g. its storage-slot number.
    async fn set_field(&self, key: &EntryKey, field: &str, value: &str)
        -> Result<(), CommandError>;
}
