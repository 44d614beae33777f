// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User endpoints.

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    auth::{AdminOnly, Auth},
    error::ApiError,
    models::{CurrentUserResponse, MessageResponse, UserEmailQuery, UserSummary},
    state::AppState,
};

/// Get the identity and role of the caller.
#[utoipa::path(
    get,
    path = "/users/me",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Current user", body = CurrentUserResponse),
        (status = 401, description = "Unauthorized - invalid or missing token"),
    )
)]
pub async fn me(Auth(principal): Auth) -> Json<CurrentUserResponse> {
    Json(CurrentUserResponse {
        username: principal.subject,
        role: principal.role,
    })
}

/// List all accounts (admin only).
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "All users", body = [UserSummary]),
        (status = 401, description = "Unauthorized - invalid or missing token"),
        (status = 403, description = "Forbidden - admin role required"),
    )
)]
pub async fn list_users(
    AdminOnly(_admin): AdminOnly,
    State(state): State<AppState>,
) -> Json<Vec<UserSummary>> {
    Json(state.store.read().await.list_users())
}

/// Delete an account by email (admin only).
#[utoipa::path(
    delete,
    path = "/users/delete",
    tag = "Users",
    security(("bearer" = [])),
    params(UserEmailQuery),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized - invalid or missing token"),
        (status = 403, description = "Forbidden - admin role required"),
        (status = 404, description = "User not found"),
    )
)]
pub async fn delete_user(
    AdminOnly(admin): AdminOnly,
    State(state): State<AppState>,
    Query(query): Query<UserEmailQuery>,
) -> Result<Json<MessageResponse>, ApiError> {
    let removed = state.store.write().await.delete_by_email(&query.user_email)?;

    tracing::info!(
        admin = %admin.subject,
        username = %removed.username,
        "User deleted"
    );

    Ok(Json(MessageResponse::new("User deleted successfully")))
}
