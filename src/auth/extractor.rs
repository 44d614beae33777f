// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractors for role-based authorization.
//!
//! These read the [`Principal`] the authentication gate attached to the
//! request. They never look at the `Authorization` header themselves.
//!
//! ```rust,ignore
//! async fn list_users(AdminOnly(admin): AdminOnly) -> impl IntoResponse {
//!     // only ADMIN principals reach here
//! }
//! ```
//!
//! | Extractor | Allowed roles |
//! |-----------|---------------|
//! | [`Auth`] | any |
//! | [`AdminOnly`] | ADMIN |
//! | [`StudentOnly`] | USER |
//! | [`StaffOnly`] | ADMIN, INSTRUCTOR |
//! | [`OptionalAuth`] | any, or none |

use axum::{extract::FromRequestParts, http::request::Parts};

use super::{AuthError, Principal, Role};

/// Read the principal and check it against `allowed`.
fn require_role(parts: &Parts, allowed: &[Role]) -> Result<Principal, AuthError> {
    let principal = parts
        .extensions
        .get::<Principal>()
        .cloned()
        .ok_or(AuthError::Unauthenticated)?;

    if !principal.has_any_role(allowed) {
        tracing::debug!(
            subject = %principal.subject,
            role = %principal.role,
            path = %parts.uri.path(),
            "Role not permitted for route"
        );
        return Err(AuthError::InsufficientPermissions);
    }

    Ok(principal)
}

/// Extractor for any authenticated principal.
pub struct Auth(pub Principal);

impl<S> FromRequestParts<S> for Auth
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require_role(parts, &[Role::User, Role::Instructor, Role::Admin]).map(Auth)
    }
}

/// Extractor that requires admin role.
pub struct AdminOnly(pub Principal);

impl<S> FromRequestParts<S> for AdminOnly
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require_role(parts, &[Role::Admin]).map(AdminOnly)
    }
}

/// Extractor that requires the student (`USER`) role.
pub struct StudentOnly(pub Principal);

impl<S> FromRequestParts<S> for StudentOnly
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require_role(parts, &[Role::User]).map(StudentOnly)
    }
}

/// Extractor for course staff: admins and instructors.
pub struct StaffOnly(pub Principal);

impl<S> FromRequestParts<S> for StaffOnly
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require_role(parts, &[Role::Admin, Role::Instructor]).map(StaffOnly)
    }
}

/// Optional authentication extractor.
///
/// Returns `None` for anonymous requests instead of rejecting.
pub struct OptionalAuth(pub Option<Principal>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuth(parts.extensions.get::<Principal>().cloned()))
    }
}
