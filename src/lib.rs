// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! E-learning Auth Server - bearer-token gateway for the e-learning API
//!
//! This crate authenticates requests with HS256 JWTs, classifies routes as
//! public or private, and enforces role-based access per endpoint.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum) and OpenAPI document
//! - `auth` - Token codec, route classifier, authentication gate, login
//! - `store` - In-memory user store backing login and registration
//! - `config` - Environment configuration
//! - `telemetry` - Tracing subscriber setup

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod store;
pub mod telemetry;
