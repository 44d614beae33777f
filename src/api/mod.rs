// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{auth_middleware, Principal, Role},
    models::{
        CurrentUserResponse, LoginRequest, LoginResponse, MessageResponse, SignupRequest,
        UserSummary,
    },
    state::AppState,
};

pub mod auth;
pub mod health;
pub mod users;

/// Build the application router.
///
/// `cors_origin` of `None` allows any origin.
pub fn router(state: AppState, cors_origin: Option<HeaderValue>) -> Router {
    let routes = Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/signup", post(auth::signup))
        .route("/auth/check-username", get(auth::check_username))
        .route("/auth/check-email", get(auth::check_email))
        .route("/users", get(users::list_users))
        .route("/users/me", get(users::me))
        .route("/users/delete", delete(users::delete_user))
        .route("/health", get(health::health))
        .merge(
            SwaggerUi::new("/swagger-ui").url("/v3/api-docs/openapi.json", ApiDoc::openapi()),
        );

    routes
        .layer(from_fn_with_state(state.auth.clone(), auth_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origin))
        .with_state(state)
}

fn cors_layer(origin: Option<HeaderValue>) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600));

    match origin {
        Some(origin) => layer.allow_origin(origin),
        None => layer.allow_origin(Any),
    }
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::login,
        auth::signup,
        auth::check_username,
        auth::check_email,
        users::me,
        users::list_users,
        users::delete_user,
        health::health
    ),
    components(
        schemas(
            Role,
            Principal,
            LoginRequest,
            LoginResponse,
            SignupRequest,
            UserSummary,
            CurrentUserResponse,
            MessageResponse,
            health::HealthResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Login, registration and availability checks"),
        (name = "Users", description = "Current user and account administration"),
        (name = "Health", description = "Liveness")
    )
)]
pub struct ApiDoc;
