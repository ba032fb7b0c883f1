//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `access` - Bearer token authentication, role/ownership checks, login,
//!   registration and profile updates
//! - `seed` - Demo catalog and accounts loaded at start-up

pub mod access;
pub mod seed;

pub use access::{AccessControl, AccessError, Requirement};
pub use seed::SeedError;
