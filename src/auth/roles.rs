// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User roles for authorization.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User roles for authorization.
///
/// The set is closed: tokens carrying any other role string fail to decode,
/// and unknown roles are rejected before a token is ever issued.
///
/// ## Roles
///
/// - `User` - Student; enrolls in courses and leaves feedback
/// - `Instructor` - Publishes and maintains their own courses
/// - `Admin` - Moderates content and accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Student account
    User,
    /// Course author
    Instructor,
    /// Platform administrator
    Admin,
}

impl Role {
    /// Whether this role is one of `allowed`.
    ///
    /// Membership is exact: `Admin` does not implicitly satisfy a
    /// requirement for `User`.
    pub fn is_any_of(&self, allowed: &[Role]) -> bool {
        allowed.contains(self)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Instructor => "INSTRUCTOR",
            Role::Admin => "ADMIN",
        }
    }
}

impl Default for Role {
    /// Accounts registered without an explicit role are students.
    fn default() -> Self {
        Role::User
    }
}

/// Error returned when a role string is not one of the known roles.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    /// Parse role from string (case-insensitive, optional `ROLE_` prefix).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let upper = trimmed.to_uppercase();
        match upper.strip_prefix("ROLE_").unwrap_or(&upper) {
            "USER" => Ok(Role::User),
            "INSTRUCTOR" => Ok(Role::Instructor),
            "ADMIN" => Ok(Role::Admin),
            _ => Err(UnknownRole(trimmed.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_is_exact() {
        assert!(Role::Admin.is_any_of(&[Role::Admin]));
        assert!(!Role::Admin.is_any_of(&[Role::User]));
        assert!(Role::Instructor.is_any_of(&[Role::Admin, Role::Instructor]));
        assert!(!Role::User.is_any_of(&[Role::Admin, Role::Instructor]));
        assert!(!Role::User.is_any_of(&[]));
    }

    #[test]
    fn from_str_parses_correctly() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("ADMIN".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("Instructor".parse::<Role>(), Ok(Role::Instructor));
        assert_eq!("ROLE_USER".parse::<Role>(), Ok(Role::User));
        assert_eq!(
            "superuser".parse::<Role>(),
            Err(UnknownRole("superuser".to_string()))
        );
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Role::Instructor).unwrap(), r#""INSTRUCTOR""#);
        let role: Role = serde_json::from_str(r#""ADMIN""#).unwrap();
        assert_eq!(role, Role::Admin);
        assert!(serde_json::from_str::<Role>(r#""admin""#).is_err());
    }

    #[test]
    fn default_role_is_user() {
        assert_eq!(Role::default(), Role::User);
    }
}
