/// Shared helpers for the integration suite
///
/// Builds the full router against the in-memory stores, so the tests
/// exercise routing, middleware, handlers, and services end-to-end without
/// a database.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::Service as _;

use taskbook_api::app::{build_router, AppState};
use taskbook_api::config::{ApiConfig, AuthConfig, Config, DatabaseConfig};
use taskbook_shared::store::memory::{MemTaskStore, MemUserStore};

/// Signing secret used across the suite
pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-bytes";

/// A router wired to fresh in-memory stores
pub struct TestContext {
    pub app: Router,
}

impl TestContext {
    pub fn new() -> Self {
        let users = MemUserStore::new();
        let tasks = MemTaskStore::new();

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
            },
            database: DatabaseConfig {
                url: "unused-in-memory".to_string(),
                max_connections: 1,
            },
            auth: AuthConfig {
                secret: TEST_SECRET.to_string(),
                token_ttl_hours: 2,
            },
            seed: None,
        };

        let state = AppState::new(Arc::new(users), Arc::new(tasks), config);

        Self {
            app: build_router(state),
        }
    }

    /// Sends a request through the router
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.app.clone().call(request).await.unwrap()
    }

    /// Sends a JSON request, optionally authenticated
    pub async fn send_json(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send(request).await
    }

    /// Registers an account; asserts success
    pub async fn register(&self, username: &str, email: &str, password: &str) {
        let response = self
            .send_json(
                "POST",
                "/auth/register",
                None,
                Some(json!({
                    "username": username,
                    "email": email,
                    "password": password,
                })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    /// Logs in; asserts success and returns the bearer token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .send_json(
                "POST",
                "/auth/login",
                None,
                Some(json!({ "username": username, "password": password })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = read_json(response).await;
        body["token"].as_str().expect("token in body").to_string()
    }

    /// Registers and logs in, returning the bearer token
    pub async fn register_and_login(&self, username: &str, password: &str) -> String {
        self.register(username, &format!("{}@example.com", username), password)
            .await;
        self.login(username, password).await
    }
}

/// Reads a response body as JSON
pub async fn read_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
