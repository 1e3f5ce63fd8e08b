//! Screens: what the current path points at, and which operations it has.

use siteproof_policy::normalize_path;

/// One dashboard screen. Resolved from the normalized current path, so the
/// demo mirror resolves to the same screens as the live surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Organizations,
    Users,
    Inspections,
    Evidence,
    Reports,
    Tasks,
    TaskEvidence,
    ChooseRole,
}

impl Screen {
    pub fn from_path(path: &str) -> Option<Screen> {
        match normalize_path(path).as_str() {
            siteproof_policy::DASHBOARD => Some(Screen::Home),
            siteproof_policy::ORGANIZATIONS => Some(Screen::Organizations),
            siteproof_policy::USERS => Some(Screen::Users),
            siteproof_policy::INSPECTIONS => Some(Screen::Inspections),
            siteproof_policy::EVIDENCE => Some(Screen::Evidence),
            siteproof_policy::REPORTS => Some(Screen::Reports),
            siteproof_policy::TASKS => Some(Screen::Tasks),
            siteproof_policy::TASK_EVIDENCE => Some(Screen::TaskEvidence),
            siteproof_policy::CHOOSE_ROLE => Some(Screen::ChooseRole),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Screen::Home => "Dashboard",
            Screen::Organizations => "Organizations",
            Screen::Users => "Users",
            Screen::Inspections => "Inspections",
            Screen::Evidence => "Evidence",
            Screen::Reports => "Reports",
            Screen::Tasks => "Tasks",
            Screen::TaskEvidence => "Task Evidence",
            Screen::ChooseRole => "Choose role",
        }
    }

    /// The operations this screen offers, for `help`. Evidence items have
    /// no update operation; the backend contract doesn't support one.
    pub fn operations(&self) -> &'static str {
        match self {
            Screen::Home => "ls, cd <path>",
            Screen::Organizations => "list, get <id>, create <json>, update <id> <json>, delete <id>",
            Screen::Users => "list [org-id], get <id>, create <json>, update <id> <json>, delete <id>",
            Screen::Inspections => {
                "list [org-id], get <id>, create <json>, update <id> <json>, delete <id>"
            }
            Screen::Evidence => "list <inspection-id>, get <id>, create <json>, delete <id>",
            Screen::Reports => {
                "list <inspection-id>, get <id>, create <json>, update <id> <json>, delete <id>"
            }
            Screen::Tasks => "list [org-id], get <id>, create <json>, update <id> <json>, delete <id>",
            Screen::TaskEvidence => {
                "list <task-id>, get <id>, create <json>, upload <task-id> <before|after> <file>, delete <id>"
            }
            Screen::ChooseRole => "choose <admin|manager|inspector|cleaner>",
        }
    }
}
