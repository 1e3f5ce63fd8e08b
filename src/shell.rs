//! The hosting shell: current location, role resolution, navigation guard.
//!
//! The shell is the only place that decides where the operator ends up.
//! On every navigation it derives the session mode from the target path,
//! resolves the effective role (live: the stored session user; demo: the
//! demo role preference), and asks the policy crate. Denied targets
//! bounce to the mode's landing path. The sidebar comes from the same
//! policy table, so it can never offer a screen the guard would refuse.

use siteproof_policy::{can_access, nav_entries, normalize_path, NavEntry};
use siteproof_session::{
    clear_user, demo_role, set_demo_role, stored_user, SessionMode, SessionStore, SessionUser,
    StoreError,
};
use siteproof_types::Role;

/// Outcome of a navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// The target was allowed; the shell now sits on it.
    Moved { path: String },
    /// The target was denied; the shell redirected to the landing path.
    Redirected { denied: String, landing: String },
    /// Live mode with no signed-in user: nothing to resolve a role from.
    SignInRequired,
}

pub struct Shell {
    path: String,
    store: SessionStore,
}

impl Shell {
    pub fn new(store: SessionStore, start_path: impl Into<String>) -> Self {
        Self {
            path: start_path.into(),
            store,
        }
    }

    /// Current location (the browser-address analog).
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn mode(&self) -> SessionMode {
        SessionMode::from_path(&self.path)
    }

    pub fn session_user(&self) -> Option<SessionUser> {
        stored_user(&self.store)
    }

    /// The role navigation decisions run under, if one can be resolved.
    pub fn effective_role(&self) -> Option<Role> {
        self.role_for(self.mode())
    }

    fn role_for(&self, mode: SessionMode) -> Option<Role> {
        match mode {
            SessionMode::Demo => Some(demo_role(&self.store)),
            SessionMode::Live => stored_user(&self.store).map(|u| u.role),
        }
    }

    /// Attempt to move to `target`, enforcing the access policy.
    pub fn navigate(&mut self, target: &str) -> Navigation {
        let mode = SessionMode::from_path(target);
        let Some(role) = self.role_for(mode) else {
            return Navigation::SignInRequired;
        };
        if can_access(role, target) {
            self.path = normalize_display_path(target, mode);
            Navigation::Moved {
                path: self.path.clone(),
            }
        } else {
            self.path = mode.landing_path().to_string();
            Navigation::Redirected {
                denied: target.to_string(),
                landing: self.path.clone(),
            }
        }
    }

    /// Sidebar entries for the current role and mode.
    pub fn sidebar(&self) -> Vec<NavEntry> {
        match self.effective_role() {
            Some(role) => nav_entries(role, self.mode().is_demo()),
            None => Vec::new(),
        }
    }

    /// Switch the demo role preference. If the current screen is no longer
    /// visible to the new role, the shell falls back to the demo landing
    /// path and reports it.
    pub fn switch_demo_role(&mut self, role: Role) -> Result<Navigation, StoreError> {
        set_demo_role(&self.store, role)?;
        if !self.mode().is_demo() || can_access(role, &self.path) {
            Ok(Navigation::Moved {
                path: self.path.clone(),
            })
        } else {
            let denied = std::mem::replace(&mut self.path, SessionMode::Demo.landing_path().into());
            Ok(Navigation::Redirected {
                denied,
                landing: self.path.clone(),
            })
        }
    }

    /// Sign out: drop the stored user and return to the live landing path.
    pub fn sign_out(&mut self) -> Result<(), StoreError> {
        clear_user(&self.store)?;
        self.path = SessionMode::Live.landing_path().to_string();
        Ok(())
    }
}

/// Keep the demo prefix on screen for demo targets, but tidy trailing
/// slashes the same way policy decisions do.
fn normalize_display_path(target: &str, mode: SessionMode) -> String {
    let canonical = normalize_path(target);
    match mode {
        SessionMode::Live => canonical,
        SessionMode::Demo => {
            let rest = canonical.strip_prefix("/dashboard").unwrap_or("");
            format!("{}{rest}", SessionMode::Demo.landing_path())
        }
    }
}
