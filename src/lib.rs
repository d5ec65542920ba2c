pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod layout;
pub mod middleware;
pub mod routes;
pub mod session;
pub mod state;

use axum::{
    http::{HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::config::SecurityConfig;
use crate::middleware::{access_gate_middleware, resolve_session_middleware, Access};
use crate::routes::{HOME, SIGN_IN, SIGN_OUT};
use crate::state::AppState;

/// Full application router: pages, auth actions and health
pub fn app(state: AppState) -> Router {
    let sessions = routes::page_routes()
        .merge(auth_routes())
        .layer(from_fn_with_state(state.clone(), resolve_session_middleware));

    Router::new()
        .route("/health", get(handlers::health))
        .merge(sessions)
        .fallback(handlers::not_found)
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    let guest_only = from_fn_with_state(Access::RequireGuest { redirect_to: HOME }, access_gate_middleware);

    Router::new()
        .route(SIGN_IN, post(handlers::sign_in_post).route_layer(guest_only))
        .route(SIGN_OUT, post(handlers::sign_out_post))
}

/// CORS layer for the configured origins, or `None` when CORS is disabled
pub fn cors_layer(security: &SecurityConfig) -> Option<CorsLayer> {
    if !security.enable_cors {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(allowed_origins(security))
            .allow_methods([Method::GET, Method::POST])
            .allow_credentials(true),
    )
}

/// Explicit origins from `SECURITY_CORS_ORIGINS`; wildcards and blanks are skipped
/// since credentialed CORS cannot use them.
pub fn allowed_origins(security: &SecurityConfig) -> Vec<HeaderValue> {
    security
        .cors_origins
        .iter()
        .map(|origin| origin.trim())
        .filter_map(|origin| {
            if origin.is_empty() || origin == "*" {
                tracing::warn!("Ignoring CORS origin '{}': an explicit origin is required", origin);
                return None;
            }
            match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                    None
                }
            }
        })
        .collect()
}
