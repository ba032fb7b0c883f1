//! In-memory stores for the mock shop.
//!
//! # Stores
//!
//! - [`CatalogStore`] - products
//! - [`AccountStore`] - accounts, credentials and bearer tokens
//! - [`CartLedger`] - one cart per account
//! - [`OrderLedger`] - placed orders per account
//!
//! Each store owns its records behind its own `parking_lot::RwLock`; no lock is
//! ever held across an `.await`. When one call touches several stores the locks
//! are taken one after another in the order accounts, catalog, carts, orders.
//!
//! All stores are owned by a single [`Stores`] value built at start-up and
//! shared through the application state.

pub mod accounts;
pub mod carts;
pub mod catalog;
pub mod orders;

pub use accounts::AccountStore;
pub use carts::CartLedger;
pub use catalog::CatalogStore;
pub use orders::OrderLedger;

use thiserror::Error;

/// Errors returned by store operations.
///
/// Messages are client-facing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The addressed record does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The input refers to something that cannot be used.
    #[error("{0}")]
    Validation(String),

    /// A uniqueness constraint would be violated.
    #[error("{0}")]
    Conflict(String),
}

impl StoreError {
    /// `"<what> not found"`.
    pub fn not_found(what: &str) -> Self {
        Self::NotFound(format!("{what} not found"))
    }
}

/// The complete shop state.
#[derive(Debug, Default)]
pub struct Stores {
    catalog: CatalogStore,
    accounts: AccountStore,
    carts: CartLedger,
    orders: OrderLedger,
}

impl Stores {
    /// Create empty stores.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the product catalog.
    #[must_use]
    pub const fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    /// Get the account store.
    #[must_use]
    pub const fn accounts(&self) -> &AccountStore {
        &self.accounts
    }

    /// Get the cart ledger.
    #[must_use]
    pub const fn carts(&self) -> &CartLedger {
        &self.carts
    }

    /// Get the order ledger.
    #[must_use]
    pub const fn orders(&self) -> &OrderLedger {
        &self.orders
    }
}
