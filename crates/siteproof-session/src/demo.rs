//! Demo role preference and the demo organization.

use crate::store::{SessionStore, StoreError};
use siteproof_types::Role;
use tracing::warn;
use uuid::Uuid;

/// Store key for the demo role preference.
pub const DEMO_ROLE_KEY: &str = "demo-role";

/// Role assumed in demo mode when nothing valid is stored.
pub const DEFAULT_DEMO_ROLE: Role = Role::Manager;

/// Fixed organization every demo-partition record belongs to (must match
/// the backend's demo seed data).
pub const DEMO_ORG_ID: Uuid = Uuid::from_u128(0x223e4567_e89b_12d3_a456_426614174000);

/// The demo role preference. Absent or unrecognized content falls back to
/// [`DEFAULT_DEMO_ROLE`].
pub fn demo_role(store: &SessionStore) -> Role {
    match store.get(DEMO_ROLE_KEY) {
        Some(raw) => raw.parse().unwrap_or_else(|err| {
            warn!(%err, "stored demo role is invalid, using default");
            DEFAULT_DEMO_ROLE
        }),
        None => DEFAULT_DEMO_ROLE,
    }
}

/// Persist an explicit role switch. Nothing else ever writes this key.
pub fn set_demo_role(store: &SessionStore, role: Role) -> Result<(), StoreError> {
    store.set(DEMO_ROLE_KEY, role.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, SessionStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path().join("session.json"));
        (dir, store)
    }

    #[test]
    fn missing_preference_defaults_to_manager() {
        let (_dir, store) = temp_store();
        assert_eq!(demo_role(&store), Role::Manager);
    }

    #[test]
    fn invalid_preference_defaults_to_manager() {
        let (_dir, store) = temp_store();
        store.set(DEMO_ROLE_KEY, "superuser").unwrap();
        assert_eq!(demo_role(&store), Role::Manager);
    }

    #[test]
    fn switch_round_trips() {
        let (_dir, store) = temp_store();
        set_demo_role(&store, Role::Cleaner).unwrap();
        assert_eq!(demo_role(&store), Role::Cleaner);
    }

    #[test]
    fn demo_org_id_matches_backend_seed() {
        assert_eq!(
            DEMO_ORG_ID.to_string(),
            "223e4567-e89b-12d3-a456-426614174000"
        );
    }
}
