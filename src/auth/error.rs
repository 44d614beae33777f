// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.
//!
//! Per-request token failures ([`TokenError`]) never reach the client: the
//! gate converts them into "no principal". Only the authorization layer and
//! the login endpoint produce client-visible [`AuthError`]s.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Failures while issuing, decoding or validating a token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// Structure, encoding or signature is invalid
    #[error("token is malformed or its signature does not match")]
    Malformed,

    /// Signature is valid but `now >= exp`
    #[error("token has expired")]
    Expired,

    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Invalid public-route rule set. Fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassifierError {
    #[error("route rule at position {0} has an empty pattern")]
    EmptyPattern(usize),

    #[error("route rule '{0}' must start with '/'")]
    NotAbsolute(String),

    #[error("route rule '{0}' is configured more than once")]
    Duplicate(String),

    #[error("exact route rule '{exact}' is unreachable: prefix rule '{prefix}' precedes it")]
    Shadowed { exact: String, prefix: String },
}

/// Client-visible authentication / authorization error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No principal is attached to the request
    Unauthenticated,
    /// Principal is present but its role is not allowed on this route
    InsufficientPermissions,
    /// Login failed; deliberately does not say which check failed
    InvalidCredentials,
    /// Programming defect (e.g. token signing failed)
    InternalError(String),
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
    error_code: String,
}

impl AuthError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::Unauthenticated => "unauthenticated",
            AuthError::InsufficientPermissions => "insufficient_permissions",
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::InternalError(_) => "internal_error",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Unauthenticated | AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::InsufficientPermissions => StatusCode::FORBIDDEN,
            AuthError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::Unauthenticated => write!(f, "Authentication is required"),
            AuthError::InsufficientPermissions => {
                write!(f, "Insufficient permissions for this operation")
            }
            AuthError::InvalidCredentials => write!(f, "Invalid username or password"),
            AuthError::InternalError(msg) => write!(f, "Internal authentication error: {msg}"),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            error: self.to_string(),
            error_code: self.error_code().to_string(),
        });
        (status, body).into_response()
    }
}
