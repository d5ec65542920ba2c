use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::session::Session;
use crate::state::AppState;

/// Outcome of the per-request session lookup, `None` for anonymous visitors
#[derive(Clone, Debug, PartialEq)]
pub struct CurrentSession(pub Option<Session>);

/// Resolve the visitor's session once and inject it into the request.
/// Provider failures abort the request; there is no retry or fallback.
pub async fn resolve_session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let session = state.provider.current_user(request.headers()).await?;

    if let Some(session) = &session {
        tracing::debug!("Resolved session {} for '{}'", session.id, session.user.id);
    }

    request.extensions_mut().insert(CurrentSession(session));

    Ok(next.run(request).await)
}
