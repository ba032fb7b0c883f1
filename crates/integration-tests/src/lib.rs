//! End-to-end tests for the `ShopMock` storefront.
//!
//! The tests build the real router in-process and drive it with
//! `tower::ServiceExt::oneshot`, so no server or network is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopmock-integration-tests
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! #[tokio::test]
//! async fn test_health() {
//!     let app = TestApp::seeded();
//!     let resp = app.get("/health", None).await;
//!     assert_eq!(resp.status, StatusCode::OK);
//! }
//! ```

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use serde_json::Value;
use tower::ServiceExt;

use shopmock_storefront::{AppState, config::StorefrontConfig};

/// Demo admin token.
pub const ADMIN_TOKEN: &str = "admin_token";
/// Demo user tokens.
pub const USER1_TOKEN: &str = "user1_token";
pub const USER2_TOKEN: &str = "user2_token";

/// `Authorization` header value for a token.
#[must_use]
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Assert that a JSON money value equals `expected` to the cent.
///
/// # Panics
///
/// Panics if `value` is not a number or differs from `expected`.
pub fn assert_money(value: &Value, expected: f64) {
    let actual = value.as_f64().expect("money should be a JSON number");
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

/// A decoded response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    /// JSON body, or `Value::Null` for an empty body.
    pub body: Value,
}

impl TestResponse {
    /// The `error` message of an error body.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }
}

/// In-process storefront application.
#[derive(Clone)]
pub struct TestApp {
    router: Router,
}

impl TestApp {
    /// App with the demo catalog and accounts.
    #[must_use]
    pub fn seeded() -> Self {
        Self::with_config(StorefrontConfig::default())
    }

    /// App with empty stores.
    #[must_use]
    pub fn empty() -> Self {
        Self::with_config(StorefrontConfig {
            seed_demo_data: false,
            ..StorefrontConfig::default()
        })
    }

    fn with_config(config: StorefrontConfig) -> Self {
        let state = AppState::new(config).expect("demo data should load");
        Self {
            router: shopmock_storefront::app(state),
        }
    }

    /// Send a request with an optional raw `Authorization` header and raw body.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        authorization: Option<&str>,
        body: Option<(&str, Vec<u8>)>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }

        let request = match body {
            Some((content_type, bytes)) => builder
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(bytes)),
            None => builder.body(Body::empty()),
        }
        .expect("request should build");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("body should be JSON")
        };

        TestResponse { status, body }
    }

    /// Send a request with an optional bearer token and JSON body.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<&Value>,
    ) -> TestResponse {
        let authorization = token.map(bearer);
        let body = body.map(|value| {
            (
                "application/json",
                serde_json::to_vec(value).expect("JSON should serialize"),
            )
        });
        self.send(method, uri, authorization.as_deref(), body).await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: &Value) -> TestResponse {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: &Value) -> TestResponse {
        self.request(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: Option<&str>, body: &Value) -> TestResponse {
        self.request(Method::PATCH, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::DELETE, uri, token, None).await
    }

    /// `DELETE` with a JSON body.
    pub async fn delete_with(&self, uri: &str, token: Option<&str>, body: &Value) -> TestResponse {
        self.request(Method::DELETE, uri, token, Some(body)).await
    }
}
