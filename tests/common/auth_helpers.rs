//! Authentication test helpers
//!
//! Provides an in-process application fixture, request helpers and
//! utilities for registering test users.

use adboard::backend::auth::password::HashParams;
use adboard::backend::server::{app_with_state, AppState, ServerConfig};
use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

/// Signing secret of the default fixture
pub const TEST_SECRET: &str = "integration-test-secret";

/// Origin the fixture allows for CORS
pub const TEST_ORIGIN: &str = "http://localhost:3000";

/// Cheap Argon2 parameters for tests that do not exercise the cost
pub fn light_params() -> HashParams {
    HashParams {
        memory_kib: 64,
        passes: 1,
        lanes: 1,
    }
}

/// Response with the body decoded as JSON (`Null` when empty)
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Test user credentials
pub struct TestUser {
    pub id: String,
    pub login: String,
    pub password: String,
    pub token: String,
}

/// The assembled application over fresh in-memory state
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_secret(TEST_SECRET)
    }

    pub fn with_secret(secret: &str) -> Self {
        let config = ServerConfig::from_lookup(|name| match name {
            "JWT_SECRET" => Some(secret.to_string()),
            "CORS_ALLOWED_ORIGIN" => Some(TEST_ORIGIN.to_string()),
            _ => None,
        })
        .expect("test configuration is valid");
        let state = AppState::in_memory(secret, light_params()).expect("light params are valid");

        Self {
            router: app_with_state(&state, &config),
            state,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body is readable");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("body is JSON")
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> TestResponse {
        self.send(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn get(&self, uri: &str, authorization: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method(Method::GET).uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn signup(&self, login: &str, password: &str) -> TestResponse {
        self.post_json(
            "/api/signup",
            &serde_json::json!({ "login": login, "password": password }),
        )
        .await
    }

    pub async fn signin(&self, login: &str, password: &str) -> TestResponse {
        self.post_json(
            "/api/signin",
            &serde_json::json!({ "login": login, "password": password }),
        )
        .await
    }
}

/// Register a user through the API
pub async fn create_test_user(app: &TestApp, login: &str, password: &str) -> TestUser {
    let response = app.signup(login, password).await;
    assert_eq!(response.status, StatusCode::CREATED, "signup failed: {}", response.body);

    TestUser {
        id: response.body["id"].as_str().unwrap().to_string(),
        login: login.to_string(),
        password: password.to_string(),
        token: response.body["token"].as_str().unwrap().to_string(),
    }
}

/// Create authorization header value
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}
