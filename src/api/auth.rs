// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Login, registration and availability endpoints.
//!
//! All routes here are public.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

use crate::{
    auth::{self as authn, password::hash_password, AuthError},
    error::ApiError,
    models::{
        EmailQuery, LoginRequest, LoginResponse, MessageResponse, SignupRequest, UsernameQuery,
    },
    state::AppState,
};

/// Exchange a username and password for a bearer token.
///
/// Unknown usernames and wrong passwords receive the same response.
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 401, description = "Invalid username or password"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    let store = state.store.read().await;

    match authn::login(
        &*store,
        state.codec(),
        &request.username,
        &request.password,
        Utc::now(),
    ) {
        Ok(issued) => {
            tracing::info!(
                event = "auth.success",
                username = %issued.claims.sub,
                role = %issued.claims.role,
                "Login succeeded"
            );
            Ok(Json(LoginResponse {
                token: issued.token,
            }))
        }
        Err(e) => {
            tracing::warn!(
                event = "auth.failed",
                username = %request.username,
                "Login failed"
            );
            Err(e.into())
        }
    }
}

/// Register a new account.
///
/// Role defaults to `USER`. `ADMIN` accounts cannot be created here.
#[utoipa::path(
    post,
    path = "/auth/signup",
    tag = "Auth",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "User registered", body = MessageResponse),
        (status = 400, description = "Missing or invalid field"),
        (status = 403, description = "Admin registration is not allowed"),
        (status = 409, description = "Username or email already registered"),
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let role = request.validate()?;

    let password_hash = hash_password(&request.password).map_err(|e| {
        tracing::error!(error = %e, "Password hashing failed");
        ApiError::internal("Registration failed")
    })?;

    let user = state
        .store
        .write()
        .await
        .register(&request, role, password_hash)?;

    tracing::info!(username = %user.username, role = %user.role, "User registered");

    Ok(Json(MessageResponse::new("User registered successfully")))
}

/// Report whether a username is still free.
#[utoipa::path(
    get,
    path = "/auth/check-username",
    tag = "Auth",
    params(UsernameQuery),
    responses(
        (status = 200, description = "Username is available", body = MessageResponse),
        (status = 409, description = "Username already registered", body = MessageResponse),
    )
)]
pub async fn check_username(
    State(state): State<AppState>,
    Query(query): Query<UsernameQuery>,
) -> (StatusCode, Json<MessageResponse>) {
    if state.store.read().await.username_taken(&query.username) {
        (
            StatusCode::CONFLICT,
            Json(MessageResponse::new("Username already registered")),
        )
    } else {
        (
            StatusCode::OK,
            Json(MessageResponse::new("Username is available")),
        )
    }
}

/// Report whether an email address is still free.
#[utoipa::path(
    get,
    path = "/auth/check-email",
    tag = "Auth",
    params(EmailQuery),
    responses(
        (status = 200, description = "Email is available", body = MessageResponse),
        (status = 409, description = "Email already registered", body = MessageResponse),
    )
)]
pub async fn check_email(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> (StatusCode, Json<MessageResponse>) {
    if state.store.read().await.email_taken(&query.email) {
        (
            StatusCode::CONFLICT,
            Json(MessageResponse::new("Email already registered")),
        )
    } else {
        (StatusCode::OK, Json(MessageResponse::new("Email is available")))
    }
}
