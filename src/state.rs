// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use axum::extract::FromRef;
use tokio::sync::RwLock;

use crate::auth::{AuthGate, TokenCodec};
use crate::store::InMemoryStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<InMemoryStore>>,
    /// Signing key and public-route rules; read-only after startup
    pub auth: AuthGate,
}

impl AppState {
    pub fn new(store: InMemoryStore, auth: AuthGate) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            auth,
        }
    }

    pub fn codec(&self) -> &TokenCodec {
        self.auth.codec()
    }
}

impl FromRef<AppState> for AuthGate {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}
