use std::sync::Arc;

use crate::config::AppConfig;
use crate::session::{JwtSessionProvider, SessionProvider, UserDirectory};

/// Cookie attributes used when setting or clearing the session cookie
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub name: String,
    pub secure: bool,
    pub max_age_secs: u64,
}

impl CookieSettings {
    pub fn session_cookie(&self, token: &str) -> String {
        format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}{}",
            self.name,
            token,
            self.max_age_secs,
            if self.secure { "; Secure" } else { "" }
        )
    }

    pub fn cleared_cookie(&self) -> String {
        format!(
            "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0{}",
            self.name,
            if self.secure { "; Secure" } else { "" }
        )
    }
}

/// Shared application state handed to every handler and middleware
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn SessionProvider>,
    pub cookies: CookieSettings,
}

impl AppState {
    pub fn new(provider: Arc<dyn SessionProvider>, cookies: CookieSettings) -> Self {
        Self { provider, cookies }
    }

    /// Build state with the token-backed provider described by `config`
    pub fn from_config(config: &AppConfig) -> Self {
        let directory = UserDirectory::new(config.auth.users.clone());
        if directory.is_empty() {
            tracing::warn!("No users configured (AUTH_USERS); sign-in will reject every attempt");
        } else {
            tracing::info!("Loaded {} user(s) into the directory", directory.len());
        }

        let provider = JwtSessionProvider::new(&config.auth, directory);
        Self::new(Arc::new(provider), cookie_settings(config))
    }
}

pub fn cookie_settings(config: &AppConfig) -> CookieSettings {
    CookieSettings {
        name: config.auth.cookie_name.clone(),
        secure: config.auth.secure_cookie,
        max_age_secs: config.auth.session_ttl_hours.saturating_mul(3600),
    }
}
