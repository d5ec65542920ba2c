use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use super::resolve_session::CurrentSession;
use crate::error::ApiError;
use crate::session::Session;

/// Who may see a route
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Public,
    /// Signed-in visitors only; everyone else is sent to `redirect_to`
    RequireSession { redirect_to: &'static str },
    /// Anonymous visitors only (the sign-in page); signed-in visitors are sent to `redirect_to`
    RequireGuest { redirect_to: &'static str },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    Redirect(&'static str),
}

pub fn decide(access: Access, session: Option<&Session>) -> GateDecision {
    match (access, session) {
        (Access::Public, _) => GateDecision::Allow,
        (Access::RequireSession { redirect_to }, None) => GateDecision::Redirect(redirect_to),
        (Access::RequireSession { .. }, Some(_)) => GateDecision::Allow,
        (Access::RequireGuest { redirect_to }, Some(_)) => GateDecision::Redirect(redirect_to),
        (Access::RequireGuest { .. }, None) => GateDecision::Allow,
    }
}

/// Route-level gate. Must run inside `resolve_session_middleware`.
///
/// On `Allow` with a session present, the bare [`Session`] is inserted into
/// the request extensions so gated handlers can extract it directly.
pub async fn access_gate_middleware(
    State(access): State<Access>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let CurrentSession(session) = request
        .extensions()
        .get::<CurrentSession>()
        .cloned()
        .ok_or_else(|| ApiError::internal_server_error("Session must be resolved before the access gate"))?;

    match decide(access, session.as_ref()) {
        GateDecision::Allow => {
            if let Some(session) = session {
                request.extensions_mut().insert(session);
            }
            Ok(next.run(request).await)
        }
        GateDecision::Redirect(target) => {
            tracing::debug!("Gate redirecting {} -> {}", request.uri().path(), target);
            Ok(Redirect::temporary(target).into_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::UserIdentity;
    use chrono::Utc;
    use uuid::Uuid;

    fn session() -> Session {
        Session {
            id: Uuid::new_v4(),
            user: UserIdentity {
                id: "ada@example.com".to_string(),
                name: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
            },
            expires_at: Utc::now(),
        }
    }

    const GATED: Access = Access::RequireSession { redirect_to: "/auth/signin" };
    const GUEST: Access = Access::RequireGuest { redirect_to: "/" };

    #[test]
    fn test_gated_without_session_redirects() {
        assert_eq!(decide(GATED, None), GateDecision::Redirect("/auth/signin"));
        assert_eq!(
            decide(Access::RequireSession { redirect_to: "/landing" }, None),
            GateDecision::Redirect("/landing")
        );
    }

    #[test]
    fn test_gated_with_session_allows() {
        assert_eq!(decide(GATED, Some(&session())), GateDecision::Allow);
    }

    #[test]
    fn test_guest_only_redirects_signed_in_visitors() {
        assert_eq!(decide(GUEST, Some(&session())), GateDecision::Redirect("/"));
        assert_eq!(decide(GUEST, None), GateDecision::Allow);
    }

    #[test]
    fn test_public_always_allows() {
        assert_eq!(decide(Access::Public, None), GateDecision::Allow);
        assert_eq!(decide(Access::Public, Some(&session())), GateDecision::Allow);
    }

    #[test]
    fn test_decision_is_idempotent() {
        let session = session();
        for access in [GATED, GUEST, Access::Public] {
            assert_eq!(decide(access, Some(&session)), decide(access, Some(&session)));
            assert_eq!(decide(access, None), decide(access, None));
        }
    }
}
