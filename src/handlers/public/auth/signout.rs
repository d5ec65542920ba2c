use axum::{
    extract::{Extension, State},
    http::header::SET_COOKIE,
    response::{IntoResponse, Redirect, Response},
};

use crate::error::ApiError;
use crate::middleware::CurrentSession;
use crate::routes::SIGN_IN;
use crate::state::AppState;

/// POST /auth/signout - End the current session, if any, and return to sign-in
pub async fn sign_out_post(
    State(state): State<AppState>,
    Extension(CurrentSession(session)): Extension<CurrentSession>,
) -> Result<Response, ApiError> {
    if let Some(session) = session {
        state.provider.sign_out(&session).await?;
        tracing::info!("User '{}' signed out (session {})", session.user.id, session.id);
    }

    let cookie = state.cookies.cleared_cookie();
    Ok(([(SET_COOKIE, cookie)], Redirect::to(SIGN_IN)).into_response())
}
