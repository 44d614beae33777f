// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Password hashing.
//!
//! New hashes are Argon2id PHC strings. Accounts migrated from the previous
//! backend may still carry bcrypt hashes, with or without a `{bcrypt}`
//! prefix; those verify too but are never produced.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};

/// Storage prefix used by legacy delegating encoders.
const BCRYPT_PREFIX: &str = "{bcrypt}";

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hash(String),
}

/// Hash password with Argon2id.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Verify password against stored hash.
///
/// Unparseable hashes verify as `false`.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let stored = stored.strip_prefix(BCRYPT_PREFIX).unwrap_or(stored);

    if is_bcrypt(stored) {
        return bcrypt::verify(password, stored).unwrap_or(false);
    }

    PasswordHash::new(stored)
        .ok()
        .map(|parsed| Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
        .unwrap_or(false)
}

fn is_bcrypt(hash: &str) -> bool {
    ["$2a$", "$2b$", "$2x$", "$2y$"]
        .iter()
        .any(|marker| hash.starts_with(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argon2_round_trip() {
        let hash = hash_password("correct horse battery staple").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct horse battery staple", &hash));
        assert!(!verify_password("wrong", &hash));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("same").unwrap();
        let b = hash_password("same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn legacy_bcrypt_hashes_verify() {
        let hash = bcrypt::hash("legacy-pass", 4).unwrap();
        assert!(verify_password("legacy-pass", &hash));
        assert!(verify_password("legacy-pass", &format!("{{bcrypt}}{hash}")));
        assert!(!verify_password("other", &hash));
    }

    #[test]
    fn garbage_hash_never_verifies() {
        assert!(!verify_password("anything", ""));
        assert!(!verify_password("anything", "plaintext"));
        assert!(!verify_password("anything", "$2a$broken"));
    }
}
