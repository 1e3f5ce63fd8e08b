//! The signed-in user record kept in the session store.

use crate::store::{SessionStore, StoreError};
use serde::{Deserialize, Serialize};
use siteproof_types::Role;
use tracing::warn;
use uuid::Uuid;

/// Store key for the session user record.
pub const USER_KEY: &str = "siteproof_user";

/// What the shell remembers about the signed-in user between launches.
/// Saved after the first successful sign-in/sign-up exchange, cleared on
/// sign-out. The policy layer only ever reads the role field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub org_id: Uuid,
    pub email: String,
    pub role: Role,
}

pub fn save_user(store: &SessionStore, user: &SessionUser) -> Result<(), StoreError> {
    store.set_value(USER_KEY, serde_json::to_value(user)?)
}

/// The stored user, if any. Corrupt content reads as absent.
pub fn stored_user(store: &SessionStore) -> Option<SessionUser> {
    let value = store.get_value(USER_KEY)?;
    match serde_json::from_value(value) {
        Ok(user) => Some(user),
        Err(err) => {
            warn!(%err, "stored session user is malformed, ignoring");
            None
        }
    }
}

pub fn clear_user(store: &SessionStore) -> Result<(), StoreError> {
    store.remove(USER_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> SessionUser {
        SessionUser {
            id: Uuid::new_v4(),
            org_id: Uuid::new_v4(),
            email: "ops@example.com".into(),
            role: Role::Manager,
        }
    }

    #[test]
    fn user_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path().join("session.json"));
        let user = sample_user();

        save_user(&store, &user).unwrap();
        assert_eq!(stored_user(&store), Some(user));

        clear_user(&store).unwrap();
        assert_eq!(stored_user(&store), None);
    }

    #[test]
    fn malformed_user_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path().join("session.json"));
        store
            .set_value(USER_KEY, serde_json::json!({ "id": "not-a-uuid" }))
            .unwrap();
        assert_eq!(stored_user(&store), None);
    }
}
