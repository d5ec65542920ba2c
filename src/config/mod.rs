use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub session_ttl_hours: u64,
    pub cookie_name: String,
    pub secure_cookie: bool,
    pub users: Vec<UserEntry>,
}

/// One account known to the identity provider, as configured in `AUTH_USERS`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserEntry {
    pub email: String,
    pub name: String,
    pub password_sha256: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Some(port) = env::var("DASHBOARD_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.server.port = port;
        }

        // Auth overrides
        if let Ok(v) = env::var("AUTH_JWT_SECRET") {
            self.auth.jwt_secret = v;
        }
        if let Ok(v) = env::var("AUTH_SESSION_TTL_HOURS") {
            match parse_session_ttl_hours(&v) {
                Some(hours) => self.auth.session_ttl_hours = hours,
                None => tracing::warn!(
                    "Ignoring AUTH_SESSION_TTL_HOURS='{}': expected 1..={} hours",
                    v,
                    MAX_SESSION_TTL_HOURS
                ),
            }
        }
        if let Ok(v) = env::var("AUTH_COOKIE_NAME") {
            if !v.trim().is_empty() {
                self.auth.cookie_name = v.trim().to_string();
            }
        }
        if let Ok(v) = env::var("AUTH_SECURE_COOKIE") {
            self.auth.secure_cookie = v.parse().unwrap_or(self.auth.secure_cookie);
        }
        if let Ok(v) = env::var("AUTH_USERS") {
            self.auth.users = parse_users(&v);
        }

        // API overrides
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig { port: 3000 },
            auth: AuthConfig {
                jwt_secret: "development-only-secret".to_string(),
                session_ttl_hours: 24 * 7, // 1 week
                cookie_name: "session".to_string(),
                secure_cookie: false,
                users: Vec::new(),
            },
            api: ApiConfig {
                enable_request_logging: true,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["http://localhost:3000".to_string(), "http://localhost:5173".to_string()],
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig { port: 3000 },
            auth: AuthConfig {
                jwt_secret: String::new(),
                session_ttl_hours: 24,
                cookie_name: "session".to_string(),
                secure_cookie: true,
                users: Vec::new(),
            },
            api: ApiConfig {
                enable_request_logging: true,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig { port: 8080 },
            auth: AuthConfig {
                // Must be supplied through AUTH_JWT_SECRET
                jwt_secret: String::new(),
                session_ttl_hours: 8,
                cookie_name: "__Host-session".to_string(),
                secure_cookie: true,
                users: Vec::new(),
            },
            api: ApiConfig {
                enable_request_logging: false,
            },
            security: SecurityConfig {
                enable_cors: false,
                cors_origins: vec!["https://app.example.com".to_string()],
            },
        }
    }
}

/// Upper bound for session lifetime (one year)
pub const MAX_SESSION_TTL_HOURS: u64 = 24 * 366;

pub fn parse_session_ttl_hours(raw: &str) -> Option<u64> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|hours| (1..=MAX_SESSION_TTL_HOURS).contains(hours))
}

/// Parse `email|name|sha256hex` entries separated by `;`. Malformed entries are skipped.
pub fn parse_users(raw: &str) -> Vec<UserEntry> {
    raw.split(';')
        .filter_map(|entry| {
            let mut parts = entry.split('|').map(str::trim);
            let email = parts.next().filter(|s| !s.is_empty())?;
            let name = parts.next().filter(|s| !s.is_empty())?;
            let digest = parts.next().filter(|s| s.len() == 64)?;
            if parts.next().is_some() {
                tracing::warn!("Ignoring AUTH_USERS entry for '{}': too many fields", email);
                return None;
            }
            Some(UserEntry {
                email: email.to_lowercase(),
                name: name.to_string(),
                password_sha256: digest.to_lowercase(),
            })
        })
        .collect()
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
