// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication gate middleware for Axum.
//!
//! Runs once per request, before any handler:
//!
//! ```text
//! START -> CLASSIFY -> PUBLIC_PASSTHROUGH ----------------------> FORWARD
//!                   -> EXTRACT_TOKEN -> VALIDATED (principal) -> FORWARD
//!                                    -> REJECTED  (anonymous) -> FORWARD
//! ```
//!
//! ## Permissive fallthrough
//!
//! The gate never answers a request itself. A missing header, a malformed
//! header or a token that fails validation all forward the request with no
//! [`Principal`] attached. The reject decision belongs to the role
//! extractors in `extractor.rs`, which answer 401/403 for routes that need a
//! principal. Token failures are logged here and never reach the client.
//!
//! The principal travels in request extensions; nothing is stored in global
//! or thread-local state.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap, Method},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};

use super::{Principal, RouteClass, RouteClassifier, TokenCodec, TokenError, TokenValidator};

/// Required scheme prefix of the `Authorization` header.
const BEARER_PREFIX: &str = "Bearer ";

/// Shared, read-only gate configuration: signing key and public-route rules.
#[derive(Debug, Clone)]
pub struct AuthGate {
    codec: Arc<TokenCodec>,
    validator: TokenValidator,
    classifier: Arc<RouteClassifier>,
}

/// Why a private request is forwarded without a principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnonymousReason {
    MissingHeader,
    /// Header present but not `Bearer <token>` or not valid UTF-8
    InvalidHeader,
    InvalidToken(TokenError),
}

/// Result of running the gate's state machine on one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// Public route; forwarded as anonymous without reading any header
    PublicPassthrough,
    /// A principal was attached earlier in this pass; left untouched
    AlreadyAuthenticated,
    Authenticated(Principal),
    Anonymous(AnonymousReason),
}

impl AuthGate {
    pub fn new(codec: Arc<TokenCodec>, classifier: RouteClassifier) -> Self {
        Self {
            validator: TokenValidator::new(codec.clone()),
            codec,
            classifier: Arc::new(classifier),
        }
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    pub fn classifier(&self) -> &RouteClassifier {
        &self.classifier
    }

    /// Decide what to attach to a request. Pure: no I/O, no shared mutation.
    pub fn evaluate(
        &self,
        method: &Method,
        path: &str,
        headers: &HeaderMap,
        already_authenticated: bool,
        now: DateTime<Utc>,
    ) -> GateOutcome {
        if self.classifier.classify(method, path) == RouteClass::Public {
            return GateOutcome::PublicPassthrough;
        }

        let token = match bearer_token(headers) {
            Ok(token) => token,
            Err(reason) => return GateOutcome::Anonymous(reason),
        };

        if already_authenticated {
            return GateOutcome::AlreadyAuthenticated;
        }

        match self.validator.validate(token, now) {
            Ok(principal) => GateOutcome::Authenticated(principal),
            Err(e) => GateOutcome::Anonymous(AnonymousReason::InvalidToken(e)),
        }
    }
}

/// Extract the token from `Authorization: Bearer <token>`.
fn bearer_token(headers: &HeaderMap) -> Result<&str, AnonymousReason> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(AnonymousReason::MissingHeader)?
        .to_str()
        .map_err(|_| AnonymousReason::InvalidHeader)?;

    header
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AnonymousReason::InvalidHeader)
}

/// Authentication gate middleware function.
///
/// Install with `axum::middleware::from_fn_with_state(gate, auth_middleware)`.
pub async fn auth_middleware(
    State(gate): State<AuthGate>,
    mut request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let already_authenticated = request.extensions().get::<Principal>().is_some();

    let outcome = gate.evaluate(
        &method,
        &path,
        request.headers(),
        already_authenticated,
        Utc::now(),
    );

    match outcome {
        GateOutcome::PublicPassthrough => {
            tracing::debug!(%method, %path, "Skipping token processing for public endpoint");
        }
        GateOutcome::AlreadyAuthenticated => {
            tracing::debug!(%method, %path, "Request already authenticated");
        }
        GateOutcome::Authenticated(principal) => {
            tracing::debug!(
                %method,
                %path,
                subject = %principal.subject,
                role = %principal.role,
                "Authenticated request"
            );
            request.extensions_mut().insert(principal);
        }
        GateOutcome::Anonymous(AnonymousReason::MissingHeader) => {
            tracing::debug!(%method, %path, "No Authorization header");
        }
        GateOutcome::Anonymous(AnonymousReason::InvalidHeader) => {
            tracing::debug!(%method, %path, "Authorization header is not a bearer token");
        }
        GateOutcome::Anonymous(AnonymousReason::InvalidToken(e)) => {
            tracing::warn!(%method, %path, error = %e, "Token rejected, continuing unauthenticated");
        }
    }

    next.run(request).await
}
