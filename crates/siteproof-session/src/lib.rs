//! Session state for the siteproof console.
//!
//! Three concerns live here: the live-vs-demo session mode (derived from
//! the current path, never cached), a small file-backed store standing in
//! for browser local storage, and the two records kept in that store: the
//! signed-in user and the demo role preference.

mod demo;
mod mode;
mod store;
mod user;

pub use demo::{demo_role, set_demo_role, DEFAULT_DEMO_ROLE, DEMO_ORG_ID, DEMO_ROLE_KEY};
pub use mode::SessionMode;
pub use store::{SessionStore, StoreError};
pub use user::{clear_user, save_user, stored_user, SessionUser, USER_KEY};
