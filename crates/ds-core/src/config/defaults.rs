use super::model::*;
use crate::ids::ResourceId;

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            // Empty on purpose: normalize() rejects a config that leaves it so.
            resource_id: ResourceId::from(""),
            heading: "DVD Library".to_string(),
            show_add: VisibilityMode::Auto,
            show_delete: VisibilityMode::Auto,
            fields: FieldVisibility::default(),
            layout: LayoutConfig::default(),
            press_action: PressAction::default(),
            hold_action: HoldAction::default(),
        }
    }
}

impl Default for FieldVisibility {
    fn default() -> Self {
        Self {
            poster: true,
            title: true,
            year: true,
            external_id: false,
            secondary_code: false,
            box_number: true,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            rows: 1,
            columns: 5,
            max_items: 0,
            aspect_ratio: "2/3".to_string(),
        }
    }
}
