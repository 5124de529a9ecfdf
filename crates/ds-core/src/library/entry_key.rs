use serde::{Deserialize, Serialize};

use super::view_model::ViewModel;

/// Best available handle for addressing one entry in a mutating command.
///
/// Resolution order is strict: external id, then secondary code, then
/// title, and only as a last resort the record's position in the provider
/// snapshot. Identity keys and positional keys select *different* remote
/// operations; a position is not an identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKey {
    ExternalId(String),
    SecondaryCode(String),
    Title(String),
    Position(usize),
}

impl EntryKey {
    pub fn for_model(model: &ViewModel) -> Self {
        if !model.external_id.is_empty() {
            Self::ExternalId(model.external_id.clone())
        } else if !model.secondary_code.is_empty() {
            Self::SecondaryCode(model.secondary_code.clone())
        } else if !model.title.is_empty() {
            Self::Title(model.title.clone())
        } else {
            Self::Position(model.original_index)
        }
    }

    /// Whether this key addresses by snapshot position instead of identity.
    pub fn is_positional(&self) -> bool {
        matches!(self, Self::Position(_))
    }
}
