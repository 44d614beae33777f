// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token validation: signature, structure and expiry.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::{Principal, TokenCodec, TokenError};

/// Validates bearer tokens and yields the principal they identify.
///
/// The role claim is only read after both the signature and the expiry
/// checks pass; callers never see claims from an unvalidated token.
#[derive(Debug, Clone)]
pub struct TokenValidator {
    codec: Arc<TokenCodec>,
}

impl TokenValidator {
    pub fn new(codec: Arc<TokenCodec>) -> Self {
        Self { codec }
    }

    /// Validate `token` at `now`.
    ///
    /// Fails with [`TokenError::Malformed`] for bad structure or signature and
    /// with [`TokenError::Expired`] once `now >= exp`. Both are treated the
    /// same by the gate.
    pub fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<Principal, TokenError> {
        let claims = self.codec.decode(token)?;

        if claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }

        Ok(Principal::from_validated(claims))
    }
}
