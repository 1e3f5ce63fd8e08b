//! Live vs. demo session mode.

use serde::{Deserialize, Serialize};

/// Which backend partition a request belongs to. Derived from the current
/// path on every use; the mode has no lifecycle of its own and must never
/// be cached across navigations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    Live,
    Demo,
}

impl SessionMode {
    /// Paths under `/demo` are demo mode; everything else is live.
    pub fn from_path(path: &str) -> Self {
        if path.starts_with("/demo") {
            SessionMode::Demo
        } else {
            SessionMode::Live
        }
    }

    pub fn is_demo(&self) -> bool {
        matches!(self, SessionMode::Demo)
    }

    /// Where the shell sends a denied navigation.
    pub fn landing_path(&self) -> &'static str {
        match self {
            SessionMode::Live => "/dashboard",
            SessionMode::Demo => "/demo",
        }
    }
}
