//! Static page table and the shared gated-page wrapper.
//!
//! Every page goes through the same pipeline: the session is resolved by
//! [`resolve_session_middleware`](crate::middleware::resolve_session_middleware),
//! the route's [`Access`] policy is enforced by
//! [`access_gate_middleware`], and the content is composed into the layout
//! by [`page_handler`]. Adding a page means adding a row to [`ROUTES`].

use axum::{
    extract::Extension,
    middleware::from_fn_with_state,
    routing::{get, MethodRouter},
    Router,
};

use crate::handlers::pages;
use crate::layout::{self, Content};
use crate::middleware::{access_gate_middleware, Access, ApiResponse, CurrentSession};
use crate::session::Session;
use crate::state::AppState;

pub const HOME: &str = "/";
pub const LANDING: &str = "/landing";
pub const SIGN_IN: &str = "/auth/signin";
pub const SIGN_OUT: &str = "/auth/signout";

/// How a page renders, and therefore who may see it.
///
/// A gated renderer takes `&Session`, so gated content cannot be produced
/// without a resolved session.
#[derive(Clone, Copy)]
pub enum View {
    Gated {
        redirect_to: &'static str,
        render: fn(&Session) -> Content,
    },
    GuestOnly {
        redirect_to: &'static str,
        render: fn() -> Content,
    },
    Public {
        render: fn(Option<&Session>) -> Content,
    },
}

impl View {
    pub fn access(&self) -> Access {
        match *self {
            View::Gated { redirect_to, .. } => Access::RequireSession { redirect_to },
            View::GuestOnly { redirect_to, .. } => Access::RequireGuest { redirect_to },
            View::Public { .. } => Access::Public,
        }
    }
}

pub struct Route {
    pub path: &'static str,
    pub title: &'static str,
    /// Label in the dashboard navigation, if the page is listed there
    pub nav_label: Option<&'static str>,
    pub view: View,
}

pub static ROUTES: &[Route] = &[
    Route {
        path: HOME,
        title: "Home",
        nav_label: Some("Home"),
        view: View::Gated { redirect_to: LANDING, render: pages::home },
    },
    Route {
        path: "/account",
        title: "Account",
        nav_label: Some("Account"),
        view: View::Gated { redirect_to: SIGN_IN, render: pages::account },
    },
    Route {
        path: "/departments",
        title: "Departments",
        nav_label: Some("Departments"),
        view: View::Gated { redirect_to: SIGN_IN, render: pages::departments },
    },
    Route {
        path: "/departments/new",
        title: "New department",
        nav_label: None,
        view: View::Gated { redirect_to: SIGN_IN, render: pages::department_form },
    },
    Route {
        path: "/knowledge",
        title: "Knowledge",
        nav_label: Some("Knowledge"),
        view: View::Gated { redirect_to: SIGN_IN, render: pages::knowledge },
    },
    Route {
        path: "/knowledge/new",
        title: "New article",
        nav_label: None,
        view: View::Gated { redirect_to: SIGN_IN, render: pages::knowledge_form },
    },
    Route {
        path: "/pjt",
        title: "Projects",
        nav_label: Some("Projects"),
        view: View::Gated { redirect_to: SIGN_IN, render: pages::projects },
    },
    Route {
        path: "/pjt/new",
        title: "New project",
        nav_label: None,
        view: View::Gated { redirect_to: SIGN_IN, render: pages::project_form },
    },
    Route {
        path: SIGN_IN,
        title: "Sign in",
        nav_label: None,
        view: View::GuestOnly { redirect_to: HOME, render: pages::sign_in },
    },
    Route {
        path: LANDING,
        title: "Welcome",
        nav_label: None,
        view: View::Public { render: pages::landing },
    },
];

pub fn find(path: &str) -> Option<&'static Route> {
    ROUTES.iter().find(|route| route.path == path)
}

/// Router with one gated GET endpoint per row of [`ROUTES`]
pub fn page_routes() -> Router<AppState> {
    ROUTES.iter().fold(Router::new(), |router, route| {
        let gate = from_fn_with_state(route.view.access(), access_gate_middleware);
        router.route(route.path, page_handler(route).route_layer(gate))
    })
}

fn page_handler(route: &'static Route) -> MethodRouter<AppState> {
    match route.view {
        View::Gated { render, .. } => get(move |Extension(session): Extension<Session>| async move {
            let content = render(&session);
            ApiResponse::success(layout::compose(route, session, content))
        }),
        View::GuestOnly { render, .. } => get(move || async move {
            ApiResponse::success(layout::standalone(route, None, render()))
        }),
        View::Public { render } => get(
            move |Extension(CurrentSession(session)): Extension<CurrentSession>| async move {
                let content = render(session.as_ref());
                ApiResponse::success(layout::standalone(route, session, content))
            },
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_paths_are_unique() {
        let paths: HashSet<_> = ROUTES.iter().map(|route| route.path).collect();
        assert_eq!(paths.len(), ROUTES.len());
    }

    #[test]
    fn test_redirect_targets() {
        assert_eq!(find(HOME).unwrap().view.access(), Access::RequireSession { redirect_to: LANDING });
        assert_eq!(find(SIGN_IN).unwrap().view.access(), Access::RequireGuest { redirect_to: HOME });
        assert_eq!(find(LANDING).unwrap().view.access(), Access::Public);

        for path in ["/account", "/departments", "/knowledge", "/pjt", "/pjt/new"] {
            assert_eq!(
                find(path).unwrap().view.access(),
                Access::RequireSession { redirect_to: SIGN_IN },
                "{}",
                path
            );
        }
    }

    #[test]
    fn test_redirect_targets_do_not_loop() {
        // A visitor bounced by a gate must land on a page that admits them
        for route in ROUTES {
            match route.view.access() {
                Access::RequireSession { redirect_to } => {
                    let target = find(redirect_to).unwrap();
                    assert!(!matches!(target.view, View::Gated { .. }), "{} -> {}", route.path, redirect_to);
                }
                Access::RequireGuest { redirect_to } => {
                    let target = find(redirect_to).unwrap();
                    assert!(!matches!(target.view, View::GuestOnly { .. }), "{} -> {}", route.path, redirect_to);
                }
                Access::Public => {}
            }
        }
    }

    #[test]
    fn test_only_gated_pages_are_in_navigation() {
        for route in ROUTES.iter().filter(|route| route.nav_label.is_some()) {
            assert!(matches!(route.view, View::Gated { .. }), "{}", route.path);
        }
    }
}
