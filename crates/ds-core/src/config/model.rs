use serde::{Deserialize, Serialize};

use crate::ids::ResourceId;

/// Fully-populated widget configuration.
///
/// Owned by the widget instance for its lifetime and replaced wholesale on
/// reconfiguration; never patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Which host-managed collection this widget displays. Required.
    pub resource_id: ResourceId,

    /// Heading shown above the grid.
    #[serde(default)]
    pub heading: String,

    /// Visibility of the add-entry control.
    #[serde(default)]
    pub show_add: VisibilityMode,

    /// Visibility of the per-entry delete control.
    #[serde(default)]
    pub show_delete: VisibilityMode,

    /// Which fields each tile displays.
    #[serde(default)]
    pub fields: FieldVisibility,

    /// Presentation-only layout knobs, passed through to the renderer.
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Action bound to a short press on a tile.
    #[serde(default)]
    pub press_action: PressAction,

    /// Action bound to a sustained (held) press on a tile.
    #[serde(default)]
    pub hold_action: HoldAction,
}

/// Visibility of a privileged control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityMode {
    /// Visible only to owner/admin callers.
    #[default]
    Auto,
    Always,
    Never,
}

impl VisibilityMode {
    /// Resolve against the cached privilege flag.
    pub fn resolve(self, privileged: bool) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => privileged,
        }
    }
}

/// Per-field display toggles.
///
/// Identifier-style fields default to hidden; everything else is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldVisibility {
    pub poster: bool,
    pub title: bool,
    pub year: bool,
    pub external_id: bool,
    pub secondary_code: bool,
    pub box_number: bool,
}

/// Grid orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Presentation-only layout knobs. Not interpreted by the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub orientation: Orientation,

    /// Row count used by the horizontal layout.
    pub rows: u16,

    /// Column count used by the vertical layout.
    pub columns: u16,

    /// Cap on rendered entries; 0 means unlimited.
    pub max_items: usize,

    /// Poster aspect ratio, e.g. "2/3" or "16/9".
    pub aspect_ratio: String,
}

/// Action fired by a short press on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PressAction {
    /// Open the entry's external title page.
    #[default]
    OpenLink,
    None,
}

/// Action fired by a sustained press on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HoldAction {
    #[default]
    None,
    /// Prompt for a storage-slot number and assign it to the entry.
    AssignBox,
    /// Delete the entry (with confirmation).
    Delete,
}
