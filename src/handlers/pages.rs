// Content renderers for the routes in `routes::ROUTES`.
//
// Each renderer only describes the view: which data collection it shows and
// which actions it offers. Records themselves come from the data store the
// client talks to; the shell and access control are applied by the router.

use serde_json::json;

use crate::layout::Content;
use crate::routes::{HOME, SIGN_IN};
use crate::session::Session;

/// GET / - signed-in home
pub fn home(session: &Session) -> Content {
    Content::new(
        "home",
        json!({
            "greeting": format!("Welcome back, {}", session.user.name),
            "shortcuts": [
                { "label": "Projects", "href": "/pjt" },
                { "label": "Knowledge", "href": "/knowledge" },
                { "label": "Departments", "href": "/departments" },
            ]
        }),
    )
}

/// GET /account - profile of the signed-in user
pub fn account(session: &Session) -> Content {
    Content::new(
        "account",
        json!({
            "profile": {
                "id": session.user.id,
                "name": session.user.name,
                "email": session.user.email,
            },
            "session_expires_at": session.expires_at,
        }),
    )
}

pub fn departments(_session: &Session) -> Content {
    listing("departments", "Departments", "/departments/new", "New department")
}

pub fn knowledge(_session: &Session) -> Content {
    listing("knowledge", "Knowledge", "/knowledge/new", "New article")
}

pub fn projects(_session: &Session) -> Content {
    listing("projects", "Projects", "/pjt/new", "New project")
}

pub fn department_form(_session: &Session) -> Content {
    form(
        "department_form",
        "departments",
        &[("name", "text", true), ("description", "textarea", false)],
    )
}

pub fn knowledge_form(session: &Session) -> Content {
    let mut content = form(
        "knowledge_form",
        "knowledge",
        &[("title", "text", true), ("body", "textarea", true), ("tags", "text", false)],
    );
    content.body["defaults"] = json!({ "author": session.user.name });
    content
}

pub fn project_form(session: &Session) -> Content {
    let mut content = form(
        "project_form",
        "projects",
        &[
            ("name", "text", true),
            ("department", "select", true),
            ("starts_on", "date", false),
            ("ends_on", "date", false),
        ],
    );
    content.body["defaults"] = json!({ "owner": session.user.email });
    content
}

/// GET /auth/signin - only reachable without a session
pub fn sign_in() -> Content {
    Content::new(
        "sign_in",
        json!({
            "form": {
                "action": SIGN_IN,
                "method": "post",
                "fields": [
                    { "name": "email", "type": "email", "required": true },
                    { "name": "password", "type": "password", "required": true },
                ]
            }
        }),
    )
}

/// GET /landing - public; the call to action depends on whether a session exists
pub fn landing(session: Option<&Session>) -> Content {
    let cta = match session {
        Some(_) => json!({ "label": "Open dashboard", "href": HOME }),
        None => json!({ "label": "Sign in", "href": SIGN_IN }),
    };

    Content::new(
        "landing",
        json!({
            "headline": "Projects, departments and shared knowledge in one place",
            "cta": cta,
        }),
    )
}

fn listing(view: &'static str, heading: &str, create_href: &str, create_label: &str) -> Content {
    Content::new(
        view,
        json!({
            "heading": heading,
            "collection": view,
            "actions": [{ "label": create_label, "href": create_href }],
        }),
    )
}

fn form(view: &'static str, collection: &str, fields: &[(&str, &str, bool)]) -> Content {
    let fields: Vec<_> = fields
        .iter()
        .map(|(name, kind, required)| json!({ "name": name, "type": kind, "required": required }))
        .collect();

    Content::new(
        view,
        json!({
            "collection": collection,
            "fields": fields,
        }),
    )
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

    #[test]
    fn test_account_shows_session_user() {
        let content = account(&session());
        assert_eq!(content.view, "account");
        assert_eq!(content.body["profile"]["name"], "Ada Lovelace");
        assert_eq!(content.body["profile"]["email"], "ada@example.com");
    }

    #[test]
    fn test_landing_cta_depends_on_session() {
        assert_eq!(landing(None).body["cta"]["href"], "/auth/signin");
        assert_eq!(landing(Some(&session())).body["cta"]["href"], "/");
    }

    #[test]
    fn test_forms_prefill_from_session() {
        assert_eq!(project_form(&session()).body["defaults"]["owner"], "ada@example.com");
        assert_eq!(knowledge_form(&session()).body["defaults"]["author"], "Ada Lovelace");
        assert_eq!(department_form(&session()).body["fields"][0]["name"], "name");
    }
}
