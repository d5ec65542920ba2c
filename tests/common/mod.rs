#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::{body::Body, http::Request, response::Response, Router};
use serde_json::Value;
use tower::ServiceExt;

use dashboard_gate::auth::password_digest;
use dashboard_gate::config::{AppConfig, UserEntry};
use dashboard_gate::state::AppState;

pub const SECRET: &str = "integration-test-secret";
pub const EMAIL: &str = "ada@example.com";
pub const PASSWORD: &str = "analytical-engine";

/// Every page in the route table that requires a session, with its redirect target
pub const GATED_PAGES: &[(&str, &str)] = &[
    ("/", "/landing"),
    ("/account", "/auth/signin"),
    ("/departments", "/auth/signin"),
    ("/departments/new", "/auth/signin"),
    ("/knowledge", "/auth/signin"),
    ("/knowledge/new", "/auth/signin"),
    ("/pjt", "/auth/signin"),
    ("/pjt/new", "/auth/signin"),
];

pub fn auth_users() -> String {
    format!("{}|Ada Lovelace|{}", EMAIL, password_digest(PASSWORD))
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.auth.jwt_secret = SECRET.to_string();
    config.auth.users = vec![UserEntry {
        email: EMAIL.to_string(),
        name: "Ada Lovelace".to_string(),
        password_sha256: password_digest(PASSWORD),
    }];
    config
}

/// In-process router backed by the real token provider
pub fn test_app() -> (Router, AppState) {
    let state = AppState::from_config(&test_config());
    (dashboard_gate::app(state.clone()), state)
}

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.expect("router is infallible")
}

pub fn get(path: &str) -> Request<Body> {
    Request::builder().uri(path).body(Body::empty()).unwrap()
}

pub fn get_with_cookie(path: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(path)
        .header("cookie", format!("session={}", token))
        .body(Body::empty())
        .unwrap()
}

pub fn location(response: &Response) -> Option<&str> {
    response.headers().get("location").and_then(|v| v.to_str().ok())
}

pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Server binary running on a private port; killed when dropped
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_dashboard-gate"));
        cmd.arg("serve")
            .env("APP_ENV", "development")
            .env("DASHBOARD_PORT", port.to_string())
            .env("AUTH_JWT_SECRET", SECRET)
            .env("AUTH_USERS", auth_users())
            .env("RUST_LOG", "warn")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == reqwest::StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

pub async fn spawn_server() -> Result<TestServer> {
    let server = TestServer::spawn()?;
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// HTTP client that reports redirects instead of following them
pub fn client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()?)
}
