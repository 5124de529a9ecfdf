use serde_json::Value;
use thiserror::Error;

use super::model::WidgetConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required 'resource_id' (e.g. \"sensor.dvd_library\")")]
    MissingResourceId,

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Merge a partial host-supplied configuration over the defaults and
/// validate it.
///
/// Object-valued keys merge recursively (keys in `partial` override sibling
/// keys instead of replacing the whole object); arrays and scalars replace
/// outright. The input is never mutated; a fresh [`WidgetConfig`] is
/// returned on every call.
///
/// Fails with [`ConfigError::MissingResourceId`] when `resource_id` is
/// absent or blank. This is fatal: the widget must not activate on it.
pub fn normalize(partial: &Value) -> Result<WidgetConfig, ConfigError> {
    let mut merged = serde_json::to_value(WidgetConfig::default())
        .map_err(|e| ConfigError::Invalid(e.to_string()))?;
    deep_merge(&mut merged, partial);

    let config: WidgetConfig =
        serde_json::from_value(merged).map_err(|e| ConfigError::Invalid(e.to_string()))?;

    if config.resource_id.is_empty() {
        return Err(ConfigError::MissingResourceId);
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(resource_id = %config.resource_id, "widget configuration normalized");

    Ok(config)
}

/// Recursive merge of `overlay` into `target`. Only maps merge; everything
/// else (arrays included) replaces the target value wholesale.
fn deep_merge(target: &mut Value, overlay: &Value) {
    match (target, overlay) {
        (Value::Object(target_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                match target_map.get_mut(key) {
                    Some(target_value) => deep_merge(target_value, overlay_value),
                    None => {
                        target_map.insert(key.clone(), overlay_value.clone());
                    }
                }
            }
        }
        (target, overlay) => *target = overlay.clone(),
    }
}
