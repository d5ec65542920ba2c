//! Session resolution against the identity provider.
//!
//! Pages never talk to the provider directly: the resolver middleware asks
//! a [`SessionProvider`] for the current user once per request and the
//! result flows down through request extensions.

pub mod directory;
pub mod jwt;

pub use directory::UserDirectory;
pub use jwt::JwtSessionProvider;

use async_trait::async_trait;
use axum::http::HeaderMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of a signed-in visitor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// A resolved, authenticated session. Read-only for the lifetime of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub user: UserIdentity,
    pub expires_at: DateTime<Utc>,
}

/// Sign-in form payload
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// A freshly issued session together with the token that carries it
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub session: Session,
    pub token: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session provider misconfigured: {0}")]
    Misconfigured(String),
    #[error("failed to issue session token: {0}")]
    TokenIssue(String),
    #[error("session provider unavailable: {0}")]
    Unavailable(String),
}

/// External identity provider: "get current user", "sign in" and "sign out".
///
/// `current_user` returns `Ok(None)` for visitors without a usable session
/// (no token, malformed, expired or revoked). `Err` is reserved for provider
/// failures and is fatal for the request.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn current_user(&self, headers: &HeaderMap) -> Result<Option<Session>, SessionError>;

    /// Returns `Ok(None)` when the credentials are rejected.
    async fn sign_in(&self, credentials: &Credentials) -> Result<Option<IssuedSession>, SessionError>;

    async fn sign_out(&self, session: &Session) -> Result<(), SessionError>;
}

/// Candidate session tokens in resolution order: the named cookie, then a Bearer header.
///
/// Both are returned so a stale cookie does not mask a valid Bearer token.
pub fn extract_tokens(headers: &HeaderMap, cookie_name: &str) -> Vec<String> {
    let mut tokens = Vec::new();

    let from_cookie = headers
        .get_all(axum::http::header::COOKIE)
        .iter()
        .filter_map(|header| header.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == cookie_name && !value.is_empty())
        .map(|(_, value)| value.to_string());
    tokens.extend(from_cookie);

    let from_bearer = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|auth_str| auth_str.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string);
    if let Some(token) = from_bearer {
        if !tokens.contains(&token) {
            tokens.push(token);
        }
    }

    tokens
}
