use serde::Serialize;
use serde_json::Value;

use crate::routes::{Route, ROUTES, SIGN_OUT};
use crate::session::{Session, UserIdentity};

pub const APP_NAME: &str = "Dashboard";

/// Page-specific payload produced by a view renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Content {
    pub view: &'static str,
    pub body: Value,
}

impl Content {
    pub fn new(view: &'static str, body: Value) -> Self {
        Self { view, body }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    Dashboard,
    Standalone,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub href: &'static str,
    pub active: bool,
}

/// Dashboard chrome shared by every gated page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shell {
    pub app: &'static str,
    pub nav: Vec<NavItem>,
    pub user: UserIdentity,
    pub sign_out: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub path: &'static str,
    pub title: &'static str,
    pub layout: LayoutKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell: Option<Shell>,
    pub session: Option<Session>,
    pub content: Content,
}

/// Navigation entries in table order; a form page highlights its parent section
pub fn navigation(current: &str) -> Vec<NavItem> {
    ROUTES
        .iter()
        .filter_map(|route| {
            let label = route.nav_label?;
            let active = route.path == current
                || (route.path != "/" && current.starts_with(route.path) && current[route.path.len()..].starts_with('/'));
            Some(NavItem {
                label,
                href: route.path,
                active,
            })
        })
        .collect()
}

/// Wrap gated content in the dashboard shell. The session is passed through unchanged.
pub fn compose(route: &Route, session: Session, content: Content) -> Page {
    let shell = Shell {
        app: APP_NAME,
        nav: navigation(route.path),
        user: session.user.clone(),
        sign_out: SIGN_OUT,
    };

    Page {
        path: route.path,
        title: route.title,
        layout: LayoutKind::Dashboard,
        shell: Some(shell),
        session: Some(session),
        content,
    }
}

/// Pages outside the dashboard (landing, sign-in) render without the shell
pub fn standalone(route: &Route, session: Option<Session>, content: Content) -> Page {
    Page {
        path: route.path,
        title: route.title,
        layout: LayoutKind::Standalone,
        shell: None,
        session,
        content,
    }
}
