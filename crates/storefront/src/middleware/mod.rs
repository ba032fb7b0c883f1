//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, HTTP transaction)
//! 2. `TraceLayer` (request span and request/response logging)
//! 3. Request ID (add unique ID to each request)
//!
//! Authentication is not a layer: protected handlers take a [`RequireAuth`]
//! or [`RequireAdmin`] extractor.

pub mod auth;
pub mod request_id;

pub use auth::{RequireAdmin, RequireAuth};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
