//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health               - Liveness check
//!
//! # Products (writes require an admin token)
//! GET    /products             - List products
//! GET    /products/{id}        - Product detail
//! POST   /products             - Create product
//! PATCH  /products/{id}        - Update product
//! PUT    /products/{id}        - Update product (same merge as PATCH)
//! DELETE /products/{id}        - Delete product
//!
//! # Users
//! POST   /users/register       - Register account
//! POST   /users/login          - Exchange credentials for a token
//! PUT    /users/{id}           - Update own profile
//! POST   /users/reset-password - Request a password reset
//!
//! # Cart (requires auth)
//! GET    /cart                 - Show cart
//! POST   /cart/add             - Add line
//! DELETE /cart/remove          - Remove lines for a product
//!
//! # Orders (requires auth)
//! POST   /orders               - Place order
//! GET    /orders/{id}          - Order detail
//! DELETE /orders/{id}          - Delete order
//! ```

pub mod cart;
pub mod orders;
pub mod products;
pub mod users;

use axum::{
    Json, Router, middleware,
    routing::{delete, get, post, put},
};
use serde::Serialize;
use serde_json::{Value, json};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::{Level, Span};

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// `{"message": ...}` confirmation body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    #[must_use]
    pub const fn new(message: &'static str) -> Self {
        Self { message }
    }
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index).post(products::create))
        .route(
            "/products/{id}",
            get(products::show)
                .patch(products::update)
                .put(products::update)
                .delete(products::delete),
        )
}

/// Create the account routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/register", post(users::register))
        .route("/users/login", post(users::login))
        .route("/users/reset-password", post(users::reset_password))
        .route("/users/{id}", put(users::update_profile))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/cart", get(cart::show))
        .route("/cart/add", post(cart::add))
        .route("/cart/remove", delete(cart::remove))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", post(orders::create))
        .route("/orders/{id}", get(orders::show).delete(orders::delete))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(product_routes())
        .merge(user_routes())
        .merge(cart_routes())
        .merge(order_routes())
}

/// Build the complete application: routes, health check, request ids and
/// request tracing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::debug_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        user_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::new()
                            .level(Level::DEBUG)
                            .on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
