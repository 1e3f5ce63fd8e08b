//! User roles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A dashboard user's role. Assigned once at account creation (or via the
/// role-selection screen for first-time users) and immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Manager,
    Inspector,
    Cleaner,
}

/// A role string didn't match any known role.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0:?}")]
pub struct RoleParseError(pub String);

impl Role {
    /// All roles, in display order.
    pub const ALL: [Role; 4] = [Role::Admin, Role::Manager, Role::Inspector, Role::Cleaner];

    /// The wire/storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Inspector => "inspector",
            Role::Cleaner => "cleaner",
        }
    }

    /// Capitalized label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Manager => "Manager",
            Role::Inspector => "Inspector",
            Role::Cleaner => "Cleaner",
        }
    }
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            "inspector" => Ok(Role::Inspector),
            "cleaner" => Ok(Role::Cleaner),
            other => Err(RoleParseError(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_str() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn role_rejects_unknown_strings() {
        assert!("superuser".parse::<Role>().is_err());
        assert!("Admin".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn role_serde_uses_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Inspector).unwrap(), "\"inspector\"");
        let parsed: Role = serde_json::from_str("\"cleaner\"").unwrap();
        assert_eq!(parsed, Role::Cleaner);
    }
}
