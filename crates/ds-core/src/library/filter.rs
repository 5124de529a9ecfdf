use serde::{Deserialize, Serialize};

use super::view_model::ViewModel;

/// Exact-match secondary filter on the storage-slot number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BoxFacet {
    /// No facet filtering.
    #[default]
    All,
    /// Only entries stored in this exact box.
    Box(u32),
}

impl BoxFacet {
    fn matches(self, model: &ViewModel) -> bool {
        match self {
            Self::All => true,
            // An absent box number never matches a specific facet.
            Self::Box(n) => model.box_number == Some(n),
        }
    }
}

/// Apply the free-text query and the box facet, preserving order.
///
/// The query matches case-insensitively as a substring against the
/// concatenation of all searchable fields; blank queries filter nothing.
/// `original_index` is carried through untouched.
pub fn apply(models: &[ViewModel], query: &str, facet: BoxFacet) -> Vec<ViewModel> {
    let needle = query.trim().to_lowercase();
    models
        .iter()
        .filter(|m| facet.matches(m))
        .filter(|m| needle.is_empty() || haystack(m).contains(&needle))
        .cloned()
        .collect()
}

fn haystack(model: &ViewModel) -> String {
    [
        model.title.as_str(),
        model.year.as_str(),
        model.external_id.as_str(),
        model.secondary_code.as_str(),
        model.runtime.as_str(),
        model.rating.as_str(),
    ]
    .join(" ")
    .to_lowercase()
}
