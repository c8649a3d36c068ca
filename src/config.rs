// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Assembled once at startup and shared read-only through `AppState`.

use std::env;

const DEFAULT_CSRF_TOKEN_TTL_SECONDS: u64 = 24 * 60 * 60;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Display name used in logs and the health check
    pub project_name: String,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,

    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    /// HMAC key used to sign CSRF tokens
    pub csrf_secret: Vec<u8>,
    /// How long an issued CSRF token stays valid
    pub csrf_token_ttl_seconds: u64,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            project_name: "TreadmillTracker".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
            csrf_secret: b"test_csrf_secret_32_bytes_long!!".to_vec(),
            csrf_token_ttl_seconds: DEFAULT_CSRF_TOKEN_TTL_SECONDS,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            project_name: env::var("PROJECT_NAME")
                .unwrap_or_else(|_| "TreadmillTracker".to_string()),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),

            jwt_signing_key: env::var("JWT_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
                .into_bytes(),
            csrf_secret: env::var("CSRF_SECRET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("CSRF_SECRET"))?
                .into_bytes(),
            csrf_token_ttl_seconds: match env::var("CSRF_TOKEN_TTL_SECONDS") {
                Ok(raw) => raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::Invalid("CSRF_TOKEN_TTL_SECONDS", raw))?,
                Err(_) => DEFAULT_CSRF_TOKEN_TTL_SECONDS,
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}
