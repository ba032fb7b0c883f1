//! ShopMock Core - Shared types library.
//!
//! This crate provides the common types used by the ShopMock components:
//! - `storefront` - The mock shop HTTP service
//! - `integration-tests` - End-to-end tests driving the service
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no locking, no HTTP. This keeps
//! it lightweight and usable from tests and tooling alike.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, quantities, roles and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
