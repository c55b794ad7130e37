use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::AuthError;

/// Closed set of dashboard roles. The unauthenticated case is `Option<Role>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Teacher,
    Student,
    SchoolAdmin,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Teacher, Role::Student, Role::SchoolAdmin];

    /// Name used in persisted sessions and JSON payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Student => "student",
            Role::SchoolAdmin => "school_admin",
        }
    }

    /// Path segment of the dashboard section owned by this role (`/dashboard/{slug}`).
    pub fn section(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Student => "student",
            Role::SchoolAdmin => "school-admin",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Teacher => "Teacher",
            Role::Student => "Student",
            Role::SchoolAdmin => "School Admin",
        }
    }

    pub fn home_path(&self) -> String { format!("/dashboard/{}", self.section()) }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .iter()
            .copied()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| AuthError::UnknownRole(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for r in Role::ALL {
            assert_eq!(r.as_str().parse::<Role>().unwrap(), r);
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        let err = "principal".parse::<Role>().unwrap_err();
        assert!(matches!(err, AuthError::UnknownRole(ref s) if s == "principal"));
        // section slugs are not storage names
        assert!("school-admin".parse::<Role>().is_err());
    }

    #[test]
    fn serde_uses_storage_names() {
        assert_eq!(serde_json::to_string(&Role::SchoolAdmin).unwrap(), "\"school_admin\"");
        let r: Role = serde_json::from_str("\"teacher\"").unwrap();
        assert_eq!(r, Role::Teacher);
    }

    #[test]
    fn home_path_uses_section_slug() {
        assert_eq!(Role::Admin.home_path(), "/dashboard/admin");
        assert_eq!(Role::SchoolAdmin.home_path(), "/dashboard/school-admin");
    }
}
