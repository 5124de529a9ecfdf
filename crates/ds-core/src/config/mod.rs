//! Widget configuration domain model
//!
//! The host hands the widget a partial, loosely-typed configuration object.
//! [`normalize`] merges it over the built-in defaults and validates the one
//! field that has no default, the resource id of the collection to display.

pub mod defaults;
pub mod model;
pub mod normalize;

pub use model::{
    FieldVisibility, HoldAction, LayoutConfig, Orientation, PressAction, VisibilityMode,
    WidgetConfig,
};
pub use normalize::{normalize, ConfigError};
