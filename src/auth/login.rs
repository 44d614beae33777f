// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Username/password login.
//!
//! Unknown usernames and wrong passwords produce the same
//! [`LoginError::InvalidCredentials`], and both paths run one password
//! verification so response timing does not reveal which case occurred.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};

use super::password::{hash_password, verify_password};
use super::{AuthError, IssuedToken, Role, TokenCodec, TokenError};

/// Stored credential for a single account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    pub password_hash: String,
    pub role: Role,
}

/// Read-only credential lookup, implemented by the user store.
pub trait CredentialStore {
    fn find_by_username(&self, username: &str) -> Option<Credential>;
}

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl From<LoginError> for AuthError {
    fn from(err: LoginError) -> Self {
        match err {
            LoginError::InvalidCredentials => AuthError::InvalidCredentials,
            LoginError::Token(e) => AuthError::InternalError(e.to_string()),
        }
    }
}

/// Hash verified when the username does not exist.
fn decoy_hash() -> &'static str {
    static DECOY: OnceLock<String> = OnceLock::new();
    DECOY.get_or_init(|| hash_password("decoy-password-never-matches").unwrap_or_default())
}

/// Check `username`/`password` against `store` and issue a token.
///
/// The token's role always comes from the stored credential.
pub fn login<S>(
    store: &S,
    codec: &TokenCodec,
    username: &str,
    password: &str,
    now: DateTime<Utc>,
) -> Result<IssuedToken, LoginError>
where
    S: CredentialStore + ?Sized,
{
    let Some(credential) = store.find_by_username(username) else {
        verify_password(password, decoy_hash());
        return Err(LoginError::InvalidCredentials);
    };

    if !verify_password(password, &credential.password_hash) {
        return Err(LoginError::InvalidCredentials);
    }

    Ok(codec.issue(&credential.username, credential.role, now)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use chrono::{Duration, TimeZone};

    struct MapStore(HashMap<String, Credential>);

    impl CredentialStore for MapStore {
        fn find_by_username(&self, username: &str) -> Option<Credential> {
            self.0.get(username).cloned()
        }
    }

    fn store() -> MapStore {
        let credential = Credential {
            username: "real-user".to_string(),
            password_hash: hash_password("right-pass").unwrap(),
            role: Role::Instructor,
        };
        MapStore(HashMap::from([(credential.username.clone(), credential)]))
    }

    fn codec() -> TokenCodec {
        TokenCodec::new(b"login-test-secret-0123456789abcdefgh", Duration::hours(24))
    }

    fn now() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn login_issues_token_with_stored_role() {
        let codec = codec();
        let issued = login(&store(), &codec, "real-user", "right-pass", now()).unwrap();
        let claims = codec.decode(&issued.token).unwrap();
        assert_eq!(claims.sub, "real-user");
        assert_eq!(claims.role, Role::Instructor);
        assert_eq!(claims.exp, now().timestamp() + 86_400);
    }

    #[test]
    fn unknown_user_and_wrong_password_are_indistinguishable() {
        let codec = codec();
        let store = store();

        let unknown = login(&store, &codec, "ghost", "x", now()).unwrap_err();
        let wrong = login(&store, &codec, "real-user", "wrong-pass", now()).unwrap_err();

        assert!(matches!(unknown, LoginError::InvalidCredentials));
        assert!(matches!(wrong, LoginError::InvalidCredentials));
        assert_eq!(unknown.to_string(), wrong.to_string());
    }
}
