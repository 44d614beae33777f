// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token codec: issues and decodes HS256-signed JWTs.
//!
//! Tokens are three dot-separated base64url segments (header, claims,
//! signature). The signature covers the encoded header and claims, so any
//! change to either segment, including the role claim, fails decoding.
//!
//! [`TokenCodec::decode`] checks structure and signature only. Expiry is the
//! validator's job because it depends on the caller's notion of `now`.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::{Claims, Role, TokenError};

/// Default token lifetime (24 hours).
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// A freshly issued token together with the claims it carries.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Compact JWT string
    pub token: String,
    pub claims: Claims,
}

impl IssuedToken {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.claims.exp, 0)
    }
}

/// Signs and verifies tokens with a symmetric key loaded at startup.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    /// Create a codec signing with `secret` and issuing tokens valid for `ttl`.
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against an explicit `now` by the validator.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.required_spec_claims = ["exp", "sub"]
            .into_iter()
            .map(String::from)
            .collect::<HashSet<_>>();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `subject` with `role`, expiring at `now + ttl`.
    pub fn issue(&self, subject: &str, role: Role, now: DateTime<Utc>) -> Result<IssuedToken, TokenError> {
        let issued_at = now.timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            role,
            iat: issued_at,
            exp: issued_at + self.ttl.num_seconds(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        Ok(IssuedToken { token, claims })
    }

    /// Parse a token and verify its signature, without checking expiry.
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| TokenError::Malformed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
    use chrono::TimeZone;

    const SECRET: &[u8] = b"test-secret-key-that-is-at-least-32-bytes";

    fn codec() -> TokenCodec {
        TokenCodec::new(SECRET, Duration::seconds(DEFAULT_TOKEN_TTL_SECS))
    }

    fn t0() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn issue_sets_expiry_from_ttl() {
        let issued = codec().issue("alice", Role::User, t0()).unwrap();
        assert_eq!(issued.claims.iat, 1_700_000_000);
        assert_eq!(issued.claims.exp, 1_700_000_000 + 86_400);
        assert_eq!(issued.expires_at(), Some(t0() + Duration::hours(24)));
        assert_eq!(issued.token.split('.').count(), 3);
    }

    #[test]
    fn decode_recovers_subject_and_role() {
        let codec = codec();
        for role in [Role::User, Role::Instructor, Role::Admin] {
            let issued = codec.issue("bob", role, t0()).unwrap();
            let claims = codec.decode(&issued.token).unwrap();
            assert_eq!(claims.sub, "bob");
            assert_eq!(claims.role, role);
        }
    }

    #[test]
    fn decode_ignores_expiry() {
        let long_ago = Utc.timestamp_opt(1_000_000_000, 0).unwrap();
        let codec = codec();
        let issued = codec.issue("carol", Role::Admin, long_ago).unwrap();
        assert!(codec.decode(&issued.token).is_ok());
    }

    #[test]
    fn decode_rejects_other_key() {
        let issued = codec().issue("dave", Role::User, t0()).unwrap();
        let other = TokenCodec::new(
            b"a-completely-different-secret-of-32-bytes",
            Duration::hours(1),
        );
        assert_eq!(other.decode(&issued.token), Err(TokenError::Malformed));
    }

    #[test]
    fn decode_rejects_role_escalation() {
        let codec = codec();
        let issued = codec.issue("eve", Role::User, t0()).unwrap();
        let parts: Vec<&str> = issued.token.split('.').collect();

        let mut payload: serde_json::Value =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(parts[1]).unwrap()).unwrap();
        payload["role"] = serde_json::Value::String("ADMIN".to_string());
        let forged_payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&payload).unwrap());

        let forged = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);
        assert_eq!(codec.decode(&forged), Err(TokenError::Malformed));
    }

    #[test]
    fn decode_rejects_unsigned_token() {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
        let claims = URL_SAFE_NO_PAD
            .encode(br#"{"sub":"mallory","role":"ADMIN","iat":1700000000,"exp":9999999999}"#);
        let token = format!("{header}.{claims}.");
        assert_eq!(codec().decode(&token), Err(TokenError::Malformed));
    }

    #[test]
    fn decode_rejects_garbage() {
        let codec = codec();
        assert_eq!(codec.decode(""), Err(TokenError::Malformed));
        assert_eq!(codec.decode("not-a-token"), Err(TokenError::Malformed));
        assert_eq!(codec.decode("a.b.c"), Err(TokenError::Malformed));
    }

    #[test]
    fn decode_rejects_unknown_role_even_when_signed() {
        #[derive(serde::Serialize)]
        struct RawClaims<'a> {
            sub: &'a str,
            role: &'a str,
            iat: i64,
            exp: i64,
        }

        let raw = RawClaims {
            sub: "frank",
            role: "SUPERUSER",
            iat: 1_700_000_000,
            exp: 9_999_999_999,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &raw,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert_eq!(codec().decode(&token), Err(TokenError::Malformed));
    }
}
