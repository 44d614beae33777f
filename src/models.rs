// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response data structures used by the REST API. All public
//! types derive `ToSchema` for the OpenAPI document.
//!
//! ## Model Categories
//!
//! - **Accounts**: stored users and their public view
//! - **Auth**: signup, login and availability checks
//! - **Generic**: message responses

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::auth::{Credential, Role};
use crate::error::ApiError;

// =============================================================================
// Account Models
// =============================================================================

/// A registered account as held by the user store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    /// Lowercased email address
    pub email: String,
    pub username: String,
    /// Argon2id PHC string (or a legacy bcrypt hash)
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn credential(&self) -> Credential {
        Credential {
            username: self.username.clone(),
            password_hash: self.password_hash.clone(),
            role: self.role,
        }
    }
}

/// Public view of an account. Never includes the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub username: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            username: user.username.clone(),
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Response for GET /users/me
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct CurrentUserResponse {
    /// Username (token subject)
    pub username: String,
    pub role: Role,
}

// =============================================================================
// Auth Models
// =============================================================================

/// Registration request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub username: String,
    pub password: String,
    /// `USER` (default) or `INSTRUCTOR`. `ADMIN` cannot self-register.
    #[serde(default)]
    pub role: Option<String>,
}

impl SignupRequest {
    /// Check required fields and resolve the requested role.
    pub fn validate(&self) -> Result<Role, ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::bad_request("Name cannot be empty"));
        }
        if self.email.trim().is_empty() {
            return Err(ApiError::bad_request("Email cannot be empty"));
        }
        if !is_valid_email(self.email.trim()) {
            return Err(ApiError::bad_request("Invalid email format"));
        }
        if self.username.trim().is_empty() {
            return Err(ApiError::bad_request("Username cannot be empty"));
        }
        if self.password.trim().is_empty() {
            return Err(ApiError::bad_request("Password cannot be empty"));
        }

        let role = match self.role.as_deref().map(str::trim) {
            None | Some("") => Role::default(),
            Some(raw) => raw
                .parse::<Role>()
                .map_err(|_| ApiError::bad_request("Invalid role: must be 'USER' or 'INSTRUCTOR'"))?,
        };
        if role == Role::Admin {
            return Err(ApiError::forbidden(
                "Admin registration is not allowed via this endpoint",
            ));
        }

        Ok(role)
    }
}

/// Minimal shape check: one `@`, non-empty local part, dotted domain, no spaces.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain
            .split('.')
            .filter(|label| !label.is_empty())
            .count()
            >= 2
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// Bearer token for the `Authorization` header
    pub token: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct UsernameQuery {
    pub username: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct EmailQuery {
    pub email: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct UserEmailQuery {
    /// Email of the account to act on
    pub user_email: String,
}

// =============================================================================
// Generic Models
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn signup(role: Option<&str>) -> SignupRequest {
        SignupRequest {
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            username: "ada".into(),
            password: "engine".into(),
            role: role.map(String::from),
        }
    }

    #[test]
    fn signup_role_defaults_to_user() {
        assert_eq!(signup(None).validate().unwrap(), Role::User);
        assert_eq!(signup(Some(" ")).validate().unwrap(), Role::User);
        assert_eq!(signup(Some("instructor")).validate().unwrap(), Role::Instructor);
    }

    #[test]
    fn signup_rejects_admin_and_unknown_roles() {
        assert_eq!(signup(Some("ADMIN")).validate().unwrap_err().status, StatusCode::FORBIDDEN);
        assert_eq!(signup(Some("root")).validate().unwrap_err().status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn signup_rejects_blank_fields() {
        let mut request = signup(None);
        request.password = "   ".into();
        let err = request.validate().unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Password cannot be empty");
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@mail.example.org"));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("a@localhost"));
        assert!(!is_valid_email("a@b@c.com"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@.com"));
    }

    #[test]
    fn summary_omits_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            username: "ada".into(),
            password_hash: "$argon2id$secret".into(),
            role: Role::User,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&UserSummary::from(&user)).unwrap();
        assert!(!json.contains("argon2"));
        assert!(json.contains(r#""role":"USER""#));
    }
}
