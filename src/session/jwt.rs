use std::collections::HashMap;

use async_trait::async_trait;
use axum::http::HeaderMap;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::auth::{generate_jwt, validate_jwt, Claims, JwtError};
use crate::config::AuthConfig;

use super::{
    extract_tokens, Credentials, IssuedSession, Session, SessionError, SessionProvider, UserDirectory, UserIdentity,
};

/// Identity provider backed by signed session tokens and a static user directory
pub struct JwtSessionProvider {
    secret: String,
    ttl_hours: u64,
    cookie_name: String,
    directory: UserDirectory,
    /// Session id -> expiry (unix seconds) for sessions ended by sign-out
    revoked: RwLock<HashMap<Uuid, i64>>,
}

impl JwtSessionProvider {
    pub fn new(auth: &AuthConfig, directory: UserDirectory) -> Self {
        Self {
            secret: auth.jwt_secret.clone(),
            ttl_hours: auth.session_ttl_hours,
            cookie_name: auth.cookie_name.clone(),
            directory,
            revoked: RwLock::new(HashMap::new()),
        }
    }

    fn session_from_claims(claims: &Claims) -> Session {
        Session {
            id: claims.sid,
            user: UserIdentity {
                id: claims.sub.clone(),
                name: claims.name.clone(),
                email: claims.email.clone(),
            },
            expires_at: claims.expires_at(),
        }
    }

    async fn is_revoked(&self, sid: &Uuid) -> bool {
        self.revoked.read().await.contains_key(sid)
    }
}

#[async_trait]
impl SessionProvider for JwtSessionProvider {
    async fn current_user(&self, headers: &HeaderMap) -> Result<Option<Session>, SessionError> {
        for token in extract_tokens(headers, &self.cookie_name) {
            let claims = match validate_jwt(&token, &self.secret) {
                Ok(claims) => claims,
                Err(JwtError::InvalidSecret) => {
                    return Err(SessionError::Misconfigured("JWT secret not configured".to_string()));
                }
                Err(e) => {
                    tracing::debug!("Ignoring unusable session token: {}", e);
                    continue;
                }
            };

            if self.is_revoked(&claims.sid).await {
                tracing::debug!("Session {} was signed out", claims.sid);
                continue;
            }

            return Ok(Some(Self::session_from_claims(&claims)));
        }

        Ok(None)
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<Option<IssuedSession>, SessionError> {
        if self.secret.is_empty() {
            return Err(SessionError::Misconfigured("JWT secret not configured".to_string()));
        }

        let Some(user) = self.directory.verify(&credentials.email, &credentials.password) else {
            return Ok(None);
        };

        let claims = Claims::new(user.id, user.name, user.email, self.ttl_hours)
            .map_err(|e| SessionError::TokenIssue(e.to_string()))?;
        let token = generate_jwt(&claims, &self.secret).map_err(|e| match e {
            JwtError::InvalidSecret => SessionError::Misconfigured(e.to_string()),
            other => SessionError::TokenIssue(other.to_string()),
        })?;

        Ok(Some(IssuedSession {
            session: Self::session_from_claims(&claims),
            token,
        }))
    }

    async fn sign_out(&self, session: &Session) -> Result<(), SessionError> {
        let now = Utc::now().timestamp();
        let mut revoked = self.revoked.write().await;
        // Tokens past expiry are rejected by validation anyway
        revoked.retain(|_, exp| *exp > now);
        revoked.insert(session.id, session.expires_at.timestamp());
        Ok(())
    }
}
