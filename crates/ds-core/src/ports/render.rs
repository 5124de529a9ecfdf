use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::config::{FieldVisibility, LayoutConfig};
use crate::library::ViewModel;

/// Everything the rendering collaborator needs to draw one frame.
///
/// Derived wholesale from current state on every trigger; the renderer
/// never patches a previous frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub heading: String,

    /// Display name of the caller, e.g. to prefill an "added by" field.
    pub caller_name: String,

    /// Resolved visibility of the privileged controls.
    pub show_add: bool,
    pub show_delete: bool,

    /// Entry count before filtering.
    pub total: usize,

    /// Count of entries matching the query/facet, before the layout cap.
    pub matched: usize,

    /// Filtered, capped entries in snapshot order.
    pub entries: Vec<ViewModel>,

    pub fields: FieldVisibility,
    pub layout: LayoutConfig,
}

/// The external collaborator that turns frames into markup. Rendering is
/// cheap and idempotent; overlapping render triggers are safe.
#[async_trait::async_trait]
pub trait RenderPort: Send + Sync {
    async fn render(&self, frame: RenderFrame) -> Result<()>;
}
