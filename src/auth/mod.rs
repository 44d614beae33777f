// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Bearer-token authentication and role-based authorization for the
//! e-learning API.
//!
//! ## Auth Flow
//!
//! 1. Client logs in with `POST /auth/login` and receives an HS256 JWT
//!    carrying `sub` (username), `role`, `iat` and `exp`
//! 2. Client sends `Authorization: Bearer <token>`
//! 3. The gate middleware:
//!    - Classifies the route as public or private
//!    - For private routes, verifies signature and expiry
//!    - Attaches a [`Principal`] to the request on success
//! 4. Handlers declare their role requirement with an extractor
//!    ([`Auth`], [`AdminOnly`], [`StudentOnly`], [`StaffOnly`])
//!
//! ## Security
//!
//! - Tokens are verified, never trusted: the role is read only after the
//!   signature and expiry checks pass
//! - No server-side revocation; validity is signature + expiry only
//! - Token failures never surface to the client; the extractors answer
//!   401 (no principal) or 403 (wrong role)

pub mod claims;
pub mod codec;
pub mod error;
pub mod extractor;
pub mod login;
pub mod middleware;
pub mod password;
pub mod roles;
pub mod routes;
pub mod validator;

pub use claims::{Claims, Principal};
pub use codec::{IssuedToken, TokenCodec, DEFAULT_TOKEN_TTL_SECS};
pub use error::{AuthError, ClassifierError, TokenError};
pub use extractor::{AdminOnly, Auth, OptionalAuth, StaffOnly, StudentOnly};
pub use login::{login, Credential, CredentialStore, LoginError};
pub use middleware::{auth_middleware, AuthGate, GateOutcome};
pub use roles::Role;
pub use routes::{default_public_rules, MatchKind, RouteClass, RouteClassifier, RouteRule};
pub use validator::TokenValidator;
