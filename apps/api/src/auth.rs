//! Session authentication.
//!
//! Sessions are issued elsewhere; this service only resolves an opaque
//! bearer token to a user id. Every failure looks the same to the caller so
//! unknown users cannot be told apart from bad tokens.

use std::fmt;

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

const SESSION_KEY_PREFIX: &str = "session:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unauthenticated")]
pub struct Unauthenticated;

#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, token: &str) -> Result<UserId, Unauthenticated>;
}

/// Resolves `session:<token>` keys in Redis to user ids.
#[derive(Clone)]
pub struct RedisSessionAuthenticator {
    client: redis::Client,
}

impl RedisSessionAuthenticator {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Authenticator for RedisSessionAuthenticator {
    async fn authenticate(&self, token: &str) -> Result<UserId, Unauthenticated> {
        let key = session_key(token).ok_or(Unauthenticated)?;

        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| {
                error!("Session store unavailable: {e}");
                Unauthenticated
            })?;

        let stored: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| {
                error!("Session lookup failed: {e}");
                Unauthenticated
            })?;

        let user_id = stored
            .as_deref()
            .and_then(|s| Uuid::parse_str(s).ok())
            .ok_or_else(|| {
                debug!("Session token did not resolve to a user");
                Unauthenticated
            })?;

        Ok(UserId(user_id))
    }
}

/// Redis key holding the session for `token`; `None` for a blank token.
fn session_key(token: &str) -> Option<String> {
    let token = token.trim();
    (!token.is_empty()).then(|| format!("{SESSION_KEY_PREFIX}{token}"))
}

/// Returns the bearer token from the `Authorization` header, or `""`.
pub fn bearer_token(headers: &HeaderMap) -> &str {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .unwrap_or("")
}

/// Raw bearer token, unverified. Used by routes whose handlers authenticate
/// as part of a larger flow.
pub struct BearerToken(pub String);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for BearerToken {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(BearerToken(bearer_token(&parts.headers).to_string()))
    }
}

/// An authenticated caller. Rejects with 401 before the handler runs.
pub struct AuthUser(pub UserId);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers);
        state
            .authenticator
            .authenticate(token)
            .await
            .map(AuthUser)
            .map_err(|_| AppError::Unauthorized)
    }
}
