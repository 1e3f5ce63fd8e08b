//! Per-call request context.

use siteproof_session::{demo_role, SessionMode, SessionStore};
use siteproof_types::Role;

/// The state a single dispatch consults: the session mode and, in demo
/// mode, the role to impersonate. Built fresh from the current path at
/// call time so a call issued right after a navigation picks up the new
/// mode; never cached across calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestContext {
    Live,
    Demo { role: Role },
}

impl RequestContext {
    /// Derive the context from the current shell path. The demo role
    /// preference is only read when the path puts us in demo mode.
    pub fn from_path(path: &str, store: &SessionStore) -> Self {
        match SessionMode::from_path(path) {
            SessionMode::Demo => RequestContext::Demo {
                role: demo_role(store),
            },
            SessionMode::Live => RequestContext::Live,
        }
    }

    pub fn mode(&self) -> SessionMode {
        match self {
            RequestContext::Live => SessionMode::Live,
            RequestContext::Demo { .. } => SessionMode::Demo,
        }
    }

    pub fn is_demo(&self) -> bool {
        matches!(self, RequestContext::Demo { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use siteproof_session::set_demo_role;

    #[test]
    fn context_follows_path_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path().join("session.json"));
        set_demo_role(&store, Role::Cleaner).unwrap();

        assert_eq!(
            RequestContext::from_path("/demo/tasks", &store),
            RequestContext::Demo { role: Role::Cleaner }
        );
        assert_eq!(
            RequestContext::from_path("/dashboard/tasks", &store),
            RequestContext::Live
        );
    }

    #[test]
    fn demo_context_defaults_role_when_store_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path().join("session.json"));
        assert_eq!(
            RequestContext::from_path("/demo", &store),
            RequestContext::Demo { role: Role::Manager }
        );
    }
}
