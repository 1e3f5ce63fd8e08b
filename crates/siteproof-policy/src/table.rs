//! The access table and the two decisions derived from it.

use crate::routes::{self, normalize_path, CHOOSE_ROLE};
use siteproof_types::Role;

/// Role → reachable routes, in display order. This table is the single
/// source of truth for reachability; both the sidebar and the navigation
/// guard consume it.
pub static ACCESS_TABLE: &[(Role, &[&str])] = &[
    (
        Role::Admin,
        &[
            routes::DASHBOARD,
            routes::ORGANIZATIONS,
            routes::USERS,
            routes::INSPECTIONS,
            routes::EVIDENCE,
            routes::REPORTS,
            routes::TASKS,
            routes::TASK_EVIDENCE,
        ],
    ),
    (
        Role::Manager,
        &[
            routes::DASHBOARD,
            routes::USERS,
            routes::INSPECTIONS,
            routes::EVIDENCE,
            routes::REPORTS,
            routes::TASKS,
            routes::TASK_EVIDENCE,
        ],
    ),
    (
        Role::Inspector,
        &[
            routes::DASHBOARD,
            routes::INSPECTIONS,
            routes::EVIDENCE,
            routes::REPORTS,
            routes::TASKS,
            routes::TASK_EVIDENCE,
        ],
    ),
    (
        Role::Cleaner,
        &[
            routes::DASHBOARD,
            routes::EVIDENCE,
            routes::TASKS,
            routes::TASK_EVIDENCE,
        ],
    ),
];

/// The routes a role may reach, in table order. Empty for a role missing
/// from the table (which the totality test rules out).
pub fn allowed_routes(role: Role) -> &'static [&'static str] {
    ACCESS_TABLE
        .iter()
        .find(|(r, _)| *r == role)
        .map(|(_, routes)| *routes)
        .unwrap_or(&[])
}

/// Whether `role` may reach `path`. Accepts canonical or demo-prefixed
/// paths; the role-selection screen is always reachable. Unknown paths and
/// roles without a table entry fail closed.
pub fn can_access(role: Role, path: &str) -> bool {
    let normalized = normalize_path(path);
    if normalized == CHOOSE_ROLE {
        return true;
    }
    allowed_routes(role).contains(&normalized.as_str())
}
