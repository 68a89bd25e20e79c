//! Shared test harness: a router over a temp-file database
#![allow(dead_code)]

use alas_server::{AppState, Config, api};
use axum::Router;
use axum::body::Body;
use http::{Request, Response, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub tmp: tempfile::TempDir,
}

pub async fn spawn() -> TestApp {
    let tmp = tempfile::tempdir().unwrap();
    let config = Config {
        database_path: tmp.path().join("test.db").to_string_lossy().into_owned(),
        port: 0,
        environment: "development".into(),
        upload_dir: tmp.path().join("uploads").to_string_lossy().into_owned(),
        upload_public_path: "/static/uploads".into(),
        default_admin_email: "admin@example.com".into(),
        default_admin_password: "Admin2024!".into(),
    };
    let state = AppState::new(&config).await.unwrap();
    let router = api::create_router(state.clone());
    TestApp { router, state, tmp }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn send_json(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.send(request).await;
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub fn get(&self, path: &str, session: Option<&str>) -> Request<Body> {
        request("GET", path, session, None)
    }

    pub fn delete(&self, path: &str, session: Option<&str>) -> Request<Body> {
        request("DELETE", path, session, None)
    }

    pub fn post_json(&self, path: &str, body: &Value, session: Option<&str>) -> Request<Body> {
        request("POST", path, session, Some(body))
    }

    pub fn put_json(&self, path: &str, body: &Value, session: Option<&str>) -> Request<Body> {
        request("PUT", path, session, Some(body))
    }

    /// Log in and return the session token from the Set-Cookie header.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let body = serde_json::json!({ "email": email, "password": password });
        let response = self.send(self.post_json("/api/auth", &body, None)).await;
        assert_eq!(response.status(), StatusCode::OK, "login failed");

        let cookie = response
            .headers()
            .get(http::header::SET_COOKIE)
            .expect("login sets a session cookie")
            .to_str()
            .unwrap();
        let (pair, _) = cookie.split_once(';').unwrap();
        let (name, token) = pair.split_once('=').unwrap();
        assert_eq!(name, "session");
        token.to_string()
    }

    /// Log in as the bootstrap super admin.
    pub async fn login_default(&self) -> String {
        self.login("admin@example.com", "Admin2024!").await
    }
}

fn request(
    method: &str,
    path: &str,
    session: Option<&str>,
    body: Option<&Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = session {
        builder = builder.header(http::header::COOKIE, format!("session={token}"));
    }
    match body {
        Some(json) => builder
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}
