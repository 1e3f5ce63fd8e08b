//! Canonical route constants and path normalization.

/// Dashboard landing screen (the canonical root).
pub const DASHBOARD: &str = "/dashboard";
pub const ORGANIZATIONS: &str = "/dashboard/organizations";
pub const USERS: &str = "/dashboard/users";
pub const INSPECTIONS: &str = "/dashboard/inspections";
pub const EVIDENCE: &str = "/dashboard/evidence";
pub const REPORTS: &str = "/dashboard/reports";
pub const TASKS: &str = "/dashboard/tasks";
pub const TASK_EVIDENCE: &str = "/dashboard/task-evidence";
/// Role-selection screen; reachable by every role so onboarding can finish.
pub const CHOOSE_ROLE: &str = "/dashboard/choose-role";

/// Prefix of the demo mirror of the route surface.
pub const DEMO_PREFIX: &str = "/demo";

/// Normalize a path for a policy decision: strip one trailing slash (an
/// empty result means the dashboard root), then rewrite a `/demo` prefix to
/// the canonical `/dashboard` form. Already-canonical paths come back
/// unchanged.
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.strip_suffix('/').unwrap_or(path);
    if trimmed.is_empty() {
        return DASHBOARD.to_string();
    }
    match trimmed.strip_prefix(DEMO_PREFIX) {
        Some(rest) => format!("{DASHBOARD}{rest}"),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn normalize_strips_trailing_slash() {
        assert_eq!(normalize_path("/dashboard/tasks/"), "/dashboard/tasks");
        assert_eq!(normalize_path("/"), "/dashboard");
        assert_eq!(normalize_path(""), "/dashboard");
    }

    #[test]
    fn normalize_rewrites_demo_prefix() {
        assert_eq!(normalize_path("/demo"), "/dashboard");
        assert_eq!(normalize_path("/demo/"), "/dashboard");
        assert_eq!(normalize_path("/demo/tasks"), "/dashboard/tasks");
        assert_eq!(normalize_path("/demo/task-evidence"), "/dashboard/task-evidence");
    }

    #[test]
    fn normalize_leaves_canonical_paths_alone() {
        assert_eq!(normalize_path("/dashboard"), "/dashboard");
        assert_eq!(normalize_path("/dashboard/reports"), "/dashboard/reports");
        assert_eq!(normalize_path("/login"), "/login");
    }

    proptest! {
        // Canonical inputs (no trailing slash, no demo prefix) are fixed points.
        #[test]
        fn normalize_is_noop_on_canonical_paths(segment in "[a-z\\-]{1,12}") {
            let path = format!("/dashboard/{segment}");
            prop_assert_eq!(normalize_path(&path), path);
        }
    }
}
