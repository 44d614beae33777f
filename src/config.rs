// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is read from the environment once at startup and never
//! changes afterwards. Any error here is fatal.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `JWT_SECRET` | HMAC-SHA256 signing key, at least 32 bytes | Required |
//! | `JWT_TTL_SECS` | Token lifetime in seconds | `86400` |
//! | `CORS_ALLOWED_ORIGIN` | Allowed CORS origin (`*` for any) | `*` |
//! | `SEED_ADMIN_USERNAME` | Bootstrap admin account username | Unset |
//! | `SEED_ADMIN_PASSWORD` | Bootstrap admin account password | Unset |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use axum::http::HeaderValue;
use chrono::Duration;

use crate::auth::DEFAULT_TOKEN_TTL_SECS;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";
pub const JWT_TTL_ENV: &str = "JWT_TTL_SECS";
pub const CORS_ORIGIN_ENV: &str = "CORS_ALLOWED_ORIGIN";
pub const SEED_ADMIN_USERNAME_ENV: &str = "SEED_ADMIN_USERNAME";
pub const SEED_ADMIN_PASSWORD_ENV: &str = "SEED_ADMIN_PASSWORD";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Default tracing filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Minimum HS256 key length in bytes (256 bits).
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },

    #[error("JWT_SECRET is {0} bytes; at least {MIN_JWT_SECRET_LENGTH} are required")]
    WeakSecret(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Bootstrap administrator created at startup.
#[derive(Clone)]
pub struct SeedAdmin {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for SeedAdmin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedAdmin")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl: Duration,
    /// `None` allows any origin
    pub cors_allowed_origin: Option<HeaderValue>,
    pub seed_admin: Option<SeedAdmin>,
    pub log_format: LogFormat,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("token_ttl", &self.token_ttl)
            .field("cors_allowed_origin", &self.cors_allowed_origin)
            .field("seed_admin", &self.seed_admin)
            .field("log_format", &self.log_format)
            .finish_non_exhaustive()
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup(HOST_ENV).unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match lookup(PORT_ENV) {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                var: PORT_ENV,
                reason: e.to_string(),
            })?,
            None => 8080,
        };

        let jwt_secret = lookup(JWT_SECRET_ENV)
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing(JWT_SECRET_ENV))?;
        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(ConfigError::WeakSecret(jwt_secret.len()));
        }

        let ttl_secs = match lookup(JWT_TTL_ENV) {
            Some(raw) => {
                let secs = raw.parse::<i64>().map_err(|e| ConfigError::Invalid {
                    var: JWT_TTL_ENV,
                    reason: e.to_string(),
                })?;
                if secs <= 0 {
                    return Err(ConfigError::Invalid {
                        var: JWT_TTL_ENV,
                        reason: "must be positive".to_string(),
                    });
                }
                secs
            }
            None => DEFAULT_TOKEN_TTL_SECS,
        };

        let cors_allowed_origin = match lookup(CORS_ORIGIN_ENV).as_deref().map(str::trim) {
            None | Some("") | Some("*") => None,
            Some(origin) => Some(HeaderValue::from_str(origin).map_err(|e| ConfigError::Invalid {
                var: CORS_ORIGIN_ENV,
                reason: e.to_string(),
            })?),
        };

        let seed_admin = match (lookup(SEED_ADMIN_USERNAME_ENV), lookup(SEED_ADMIN_PASSWORD_ENV)) {
            (Some(username), Some(password)) if !username.trim().is_empty() && !password.is_empty() => {
                Some(SeedAdmin { username, password })
            }
            (None, None) => None,
            _ => {
                return Err(ConfigError::Invalid {
                    var: SEED_ADMIN_USERNAME_ENV,
                    reason: format!("{SEED_ADMIN_USERNAME_ENV} and {SEED_ADMIN_PASSWORD_ENV} must be set together"),
                })
            }
        };

        let log_format = match lookup(LOG_FORMAT_ENV).as_deref().map(str::to_lowercase).as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: LOG_FORMAT_ENV,
                    reason: format!("expected 'json' or 'pretty', got '{other}'"),
                })
            }
        };

        Ok(Self {
            host,
            port,
            jwt_secret,
            token_ttl: Duration::seconds(ttl_secs),
            cors_allowed_origin,
            seed_admin,
            log_format,
        })
    }
}
