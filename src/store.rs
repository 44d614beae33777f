// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory user store.
//!
//! Holds accounts keyed by username and serves as the credential source for
//! login. Emails are stored lowercased and compared case-insensitively;
//! usernames are compared exactly.

use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use crate::auth::{Credential, CredentialStore, Role};
use crate::error::ApiError;
use crate::models::{SignupRequest, User, UserSummary};

#[derive(Default)]
pub struct InMemoryStore {
    users: HashMap<String, User>,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn username_taken(&self, username: &str) -> bool {
        self.users.contains_key(username.trim())
    }

    pub fn email_taken(&self, email: &str) -> bool {
        self.find_by_email(email).is_some()
    }

    pub fn find_by_username(&self, username: &str) -> Option<&User> {
        self.users.get(username)
    }

    pub fn find_by_email(&self, email: &str) -> Option<&User> {
        let email = normalize_email(email);
        self.users.values().find(|user| user.email == email)
    }

    /// Register an account from a validated signup request.
    pub fn register(
        &mut self,
        request: &SignupRequest,
        role: Role,
        password_hash: String,
    ) -> Result<User, ApiError> {
        self.insert(
            request.name.trim(),
            &request.email,
            request.username.trim(),
            role,
            password_hash,
        )
    }

    /// Insert an account, rejecting duplicate usernames and emails.
    pub fn insert(
        &mut self,
        name: &str,
        email: &str,
        username: &str,
        role: Role,
        password_hash: String,
    ) -> Result<User, ApiError> {
        if self.username_taken(username) {
            return Err(ApiError::conflict("Username already registered"));
        }
        if self.email_taken(email) {
            return Err(ApiError::conflict("Email already registered"));
        }

        let user = User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: normalize_email(email),
            username: username.to_string(),
            password_hash,
            role,
            created_at: Utc::now(),
        };
        self.users.insert(user.username.clone(), user.clone());
        Ok(user)
    }

    /// All accounts, ordered by username.
    pub fn list_users(&self) -> Vec<UserSummary> {
        let mut users: Vec<UserSummary> = self.users.values().map(UserSummary::from).collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        users
    }

    pub fn delete_by_email(&mut self, email: &str) -> Result<User, ApiError> {
        let username = self
            .find_by_email(email)
            .map(|user| user.username.clone())
            .ok_or_else(|| ApiError::not_found("User not found"))?;

        self.users
            .remove(&username)
            .ok_or_else(|| ApiError::not_found("User not found"))
    }
}

impl CredentialStore for InMemoryStore {
    fn find_by_username(&self, username: &str) -> Option<Credential> {
        InMemoryStore::find_by_username(self, username).map(User::credential)
    }
}
