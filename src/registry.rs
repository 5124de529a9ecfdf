//! One-time widget-type registration.
//!
//! Dashboard hosts discover available widget types through a process-wide
//! registry populated at startup. This is bootstrapping, not business
//! logic: registering is a side effect that happens once, no matter how
//! many widget instances are created afterwards.

use std::sync::Mutex;
use std::sync::Once;

use once_cell::sync::Lazy;

/// Entry the host's widget picker displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetDescriptor {
    /// Type tag instances are created under.
    pub kind: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub version: &'static str,
}

pub const WIDGET_KIND: &str = "dvd-shelf";

static REGISTRY: Lazy<Mutex<Vec<WidgetDescriptor>>> = Lazy::new(|| Mutex::new(Vec::new()));
static REGISTER: Once = Once::new();

/// Register the DVD Shelf widget type. Safe to call any number of times;
/// only the first call has an effect.
pub fn register_widget_type() {
    REGISTER.call_once(|| {
        REGISTRY.lock().unwrap().push(WidgetDescriptor {
            kind: WIDGET_KIND,
            name: "DVD Shelf",
            description: "Auto-refreshing DVD grid with posters, search, box facet, and owner/admin add & delete",
            version: env!("CARGO_PKG_VERSION"),
        });
    });
}

/// Snapshot of everything registered so far.
pub fn registered_widgets() -> Vec<WidgetDescriptor> {
    REGISTRY.lock().unwrap().clone()
}
