//! `ShopMock` storefront library.
//!
//! An in-memory mock shop backend: a product catalog, accounts with bearer
//! tokens, per-account carts and per-account orders, served as a JSON API.
//! Exposed as a library so the router can be driven from tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

pub use routes::app;
pub use state::AppState;
