//! Library domain: projection of raw provider records into render-ready
//! view models, search/facet filtering, and identifier resolution for
//! mutating commands.

pub mod entry_key;
pub mod filter;
pub mod view_model;

pub use entry_key::EntryKey;
pub use filter::{apply, BoxFacet};
pub use view_model::{project, ViewModel, PLACEHOLDER_POSTER};
