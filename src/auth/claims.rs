// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token claims and authenticated principal representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::roles::Role;

/// Claims carried by an issued access token.
///
/// Serialized as the JWT payload: `{"sub", "role", "iat", "exp"}` with
/// Unix-second timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,

    /// Role granted at issue time
    pub role: Role,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Whether the token is expired at `now`. A token is no longer valid at
    /// the exact second it expires.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

/// Authenticated identity attached to a request by the authentication gate.
///
/// This is the only type handlers and extractors read to make authorization
/// decisions. It lives in request extensions and is dropped with the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Principal {
    /// Username (token `sub` claim)
    pub subject: String,

    /// User's role
    pub role: Role,
}

impl Principal {
    pub fn new(subject: impl Into<String>, role: Role) -> Self {
        Self {
            subject: subject.into(),
            role,
        }
    }

    /// Build a principal from claims that have already passed signature and
    /// expiry checks.
    pub(crate) fn from_validated(claims: Claims) -> Self {
        Self {
            subject: claims.sub,
            role: claims.role,
        }
    }

    /// Check if the principal holds one of the allowed roles.
    pub fn has_any_role(&self, allowed: &[Role]) -> bool {
        self.role.is_any_of(allowed)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_claims() -> Claims {
        Claims {
            sub: "alice".to_string(),
            role: Role::Instructor,
            iat: 1_700_000_000,
            exp: 1_700_086_400,
        }
    }

    #[test]
    fn expiry_boundary_is_exclusive() {
        let claims = sample_claims();
        let before = Utc.timestamp_opt(1_700_086_399, 0).unwrap();
        let at = Utc.timestamp_opt(1_700_086_400, 0).unwrap();
        assert!(!claims.is_expired_at(before));
        assert!(claims.is_expired_at(at));
    }

    #[test]
    fn claims_wire_shape() {
        let json = serde_json::to_value(sample_claims()).unwrap();
        assert_eq!(json["sub"], "alice");
        assert_eq!(json["role"], "INSTRUCTOR");
        assert_eq!(json["iat"], 1_700_000_000);
        assert_eq!(json["exp"], 1_700_086_400);
    }

    #[test]
    fn principal_from_validated_claims() {
        let principal = Principal::from_validated(sample_claims());
        assert_eq!(principal.subject, "alice");
        assert_eq!(principal.role, Role::Instructor);
        assert!(principal.has_any_role(&[Role::Admin, Role::Instructor]));
        assert!(!principal.is_admin());
    }
}
