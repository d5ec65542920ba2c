use axum::{
    extract::State,
    http::header::SET_COOKIE,
    response::{IntoResponse, Redirect, Response},
    Form,
};

use crate::error::ApiError;
use crate::routes::HOME;
use crate::session::Credentials;
use crate::state::AppState;

/// POST /auth/signin - Verify credentials and start a session
///
/// Runs behind the guest-only gate, so a visitor who already has a session
/// is redirected to `/` before the provider is consulted.
///
/// Expected Input (`application/x-www-form-urlencoded`):
/// `email=ada%40example.com&password=...`
///
/// On success responds `303 See Other` to `/` with the session cookie set.
/// Rejected credentials yield `401` with the standard error body.
pub async fn sign_in_post(
    State(state): State<AppState>,
    Form(credentials): Form<Credentials>,
) -> Result<Response, ApiError> {
    let email = credentials.email.trim().to_lowercase();

    let Some(issued) = state.provider.sign_in(&credentials).await? else {
        tracing::warn!("Rejected sign-in attempt for '{}'", email);
        return Err(ApiError::unauthorized("Invalid email or password"));
    };

    tracing::info!("User '{}' signed in (session {})", issued.session.user.id, issued.session.id);

    let cookie = state.cookies.session_cookie(&issued.token);
    Ok(([(SET_COOKIE, cookie)], Redirect::to(HOME)).into_response())
}
