use std::sync::Arc;

use ds_core::ports::IdentityPort;
use ds_core::privilege::PrivilegeState;
use tracing::{debug, warn};

/// Outcome of one resolution attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPrivilege {
    pub state: PrivilegeState,
    pub caller_name: String,
}

/// Use case for resolving the caller's privilege, at most once.
///
/// An already-resolved state returns immediately without touching the
/// host. A failed identity query resolves to `Denied` (fail closed) and
/// is never retried; only a fully reconstructed widget asks again.
pub struct ResolvePrivilege {
    identity: Arc<dyn IdentityPort>,
}

impl ResolvePrivilege {
    pub fn new(identity: Arc<dyn IdentityPort>) -> Self {
        Self { identity }
    }

    pub async fn execute(&self, current: PrivilegeState) -> ResolvedPrivilege {
        if current.is_resolved() {
            return ResolvedPrivilege {
                state: current,
                caller_name: String::new(),
            };
        }

        match self.identity.current_caller().await {
            Ok(caller) => {
                let state = current.on_identity(&caller);
                debug!(caller = %caller.display_name, ?state, "caller privilege resolved");
                ResolvedPrivilege {
                    state,
                    caller_name: caller.display_name,
                }
            }
            Err(err) => {
                warn!(%err, "identity query failed, treating caller as unprivileged");
                ResolvedPrivilege {
                    state: current.on_failure(),
                    caller_name: String::new(),
                }
            }
        }
    }
}
