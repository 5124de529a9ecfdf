use serde::{Deserialize, Serialize};

/// Identity of the caller as reported by the host, used once to decide
/// whether privileged controls are available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CallerIdentity {
    pub display_name: String,
    pub is_owner: bool,
    pub is_admin: bool,
}

impl CallerIdentity {
    /// Owner and admin roles may perform privileged actions.
    pub fn is_elevated(&self) -> bool {
        self.is_owner || self.is_admin
    }
}

/// Cached privilege flag.
///
/// Starts `Unknown` per widget instance and transitions exactly once, on the
/// first successful or failed identity resolution. It never reverts: a
/// fresh resolution only happens if the widget is fully reconstructed.
///
/// ```text
/// Unknown ──→ Granted
///        └──→ Denied
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PrivilegeState {
    #[default]
    Unknown,
    Granted,
    Denied,
}

impl PrivilegeState {
    /// Whether a resolution has already happened.
    pub fn is_resolved(self) -> bool {
        self != Self::Unknown
    }

    /// Whether privileged actions are currently allowed. `Unknown` counts
    /// as not allowed until resolved.
    pub fn allows(self) -> bool {
        self == Self::Granted
    }

    /// Transition on a successful identity query. No-op once resolved.
    pub fn on_identity(self, identity: &CallerIdentity) -> Self {
        match self {
            Self::Unknown if identity.is_elevated() => Self::Granted,
            Self::Unknown => Self::Denied,
            resolved => resolved,
        }
    }

    /// Transition on a failed identity query: fail closed. No-op once
    /// resolved.
    pub fn on_failure(self) -> Self {
        match self {
            Self::Unknown => Self::Denied,
            resolved => resolved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> CallerIdentity {
        CallerIdentity {
            display_name: "Ada".to_string(),
            is_owner: false,
            is_admin: true,
        }
    }

    fn guest() -> CallerIdentity {
        CallerIdentity {
            display_name: "Gus".to_string(),
            is_owner: false,
            is_admin: false,
        }
    }

    #[test]
    fn test_unknown_is_not_allowed() {
        let state = PrivilegeState::default();
        assert!(!state.is_resolved());
        assert!(!state.allows());
    }

    #[test]
    fn test_elevated_identity_grants() {
        let state = PrivilegeState::Unknown.on_identity(&admin());
        assert_eq!(state, PrivilegeState::Granted);
        assert!(state.allows());
    }

    #[test]
    fn test_plain_identity_denies() {
        let state = PrivilegeState::Unknown.on_identity(&guest());
        assert_eq!(state, PrivilegeState::Denied);
        assert!(!state.allows());
    }

    #[test]
    fn test_failure_fails_closed() {
        let state = PrivilegeState::Unknown.on_failure();
        assert_eq!(state, PrivilegeState::Denied);
    }

    #[test]
    fn test_resolution_is_sticky() {
        // A later identity, however elevated, never flips a resolved state.
        let denied = PrivilegeState::Denied.on_identity(&admin());
        assert_eq!(denied, PrivilegeState::Denied);

        let granted = PrivilegeState::Granted.on_failure();
        assert_eq!(granted, PrivilegeState::Granted);
    }
}
