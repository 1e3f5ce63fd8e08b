//! Sidebar navigation derived from the access table.

use crate::routes::{self, DEMO_PREFIX};
use crate::table::allowed_routes;
use siteproof_types::Role;

/// One sidebar entry: a label and the href to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub label: &'static str,
    pub href: String,
}

/// Display labels, keyed by canonical route.
static NAV_LABELS: &[(&str, &str)] = &[
    (routes::DASHBOARD, "Dashboard"),
    (routes::ORGANIZATIONS, "Organizations"),
    (routes::USERS, "Users"),
    (routes::INSPECTIONS, "Inspections"),
    (routes::EVIDENCE, "Evidence"),
    (routes::REPORTS, "Reports"),
    (routes::TASKS, "Tasks"),
    (routes::TASK_EVIDENCE, "Task Evidence"),
];

fn label_for(route: &str) -> &'static str {
    NAV_LABELS
        .iter()
        .find(|(r, _)| *r == route)
        .map(|(_, label)| *label)
        .unwrap_or("")
}

/// The sidebar entries for a role, in table order. The base-path prefix is
/// a presentation detail: in demo mode hrefs are demo-prefixed and the
/// organizations entry is dropped, because organizations has no demo
/// mirror.
pub fn nav_entries(role: Role, demo: bool) -> Vec<NavEntry> {
    allowed_routes(role)
        .iter()
        .filter(|route| !(demo && **route == routes::ORGANIZATIONS))
        .map(|route| {
            let href = if demo {
                let rest = route.strip_prefix(routes::DASHBOARD).unwrap_or(route);
                format!("{DEMO_PREFIX}{rest}")
            } else {
                (*route).to_string()
            };
            NavEntry {
                label: label_for(route),
                href,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::can_access;

    #[test]
    fn nav_matches_enforcement() {
        for role in Role::ALL {
            for demo in [false, true] {
                for entry in nav_entries(role, demo) {
                    assert!(
                        can_access(role, &entry.href),
                        "{role} sidebar offers {} but the guard rejects it",
                        entry.href
                    );
                }
            }
        }
    }

    #[test]
    fn demo_nav_omits_organizations() {
        let entries = nav_entries(Role::Admin, true);
        assert!(entries.iter().all(|e| e.label != "Organizations"));
        assert_eq!(entries[0].href, "/demo");
        assert!(entries.iter().any(|e| e.href == "/demo/task-evidence"));
    }

    #[test]
    fn live_nav_for_admin_includes_organizations() {
        let entries = nav_entries(Role::Admin, false);
        assert!(entries
            .iter()
            .any(|e| e.href == "/dashboard/organizations" && e.label == "Organizations"));
    }

    #[test]
    fn cleaner_nav_is_minimal() {
        let labels: Vec<_> = nav_entries(Role::Cleaner, false)
            .into_iter()
            .map(|e| e.label)
            .collect();
        assert_eq!(labels, ["Dashboard", "Evidence", "Tasks", "Task Evidence"]);
    }

    #[test]
    fn every_entry_has_a_label() {
        for role in Role::ALL {
            for entry in nav_entries(role, false) {
                assert!(!entry.label.is_empty());
            }
        }
    }
}
