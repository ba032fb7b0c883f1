//! Demo data loaded at start-up.
//!
//! Three products and three accounts (`admin`, `user1`, `user2`), each
//! account with an empty cart and order book. Id counters continue from 4.

use secrecy::SecretString;
use tracing::info;

use shopmock_core::{Price, PriceError, Role};

use super::{AccessControl, AccessError};
use crate::models::NewProduct;
use crate::store::Stores;

/// Errors that can occur while seeding.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("invalid seed price: {0}")]
    Price(#[from] PriceError),
    #[error("failed to seed account: {0}")]
    Account(#[from] AccessError),
}

/// `(title, description, price in cents, stock, category)`
const PRODUCTS: [(&str, &str, i64, u64, &str); 3] = [
    ("Product 1", "Description of Product 1", 2999, 100, "Electronics"),
    ("Product 2", "Description of Product 2", 4999, 50, "Books"),
    ("Product 3", "Description of Product 3", 1999, 200, "Home"),
];

/// `(username, password, email, role)`
const ACCOUNTS: [(&str, &str, &str, Role); 3] = [
    ("admin", "adminpassword", "admin@example.com", Role::Admin),
    ("user1", "user1password", "user1@example.com", Role::User),
    ("user2", "user2password", "user2@example.com", Role::User),
];

/// Load the demo catalog and accounts into `stores`.
///
/// # Errors
///
/// Returns `SeedError` if a seed record is rejected, e.g. because the stores
/// already hold an account with a seed username.
pub fn demo_data(stores: &Stores) -> Result<(), SeedError> {
    for (title, description, cents, stock, category) in PRODUCTS {
        stores.catalog().create(NewProduct {
            title: title.to_owned(),
            description: description.to_owned(),
            price: Price::from_cents(cents)?,
            stock,
            category: category.to_owned(),
        });
    }

    let access = AccessControl::new(stores);
    for (username, password, email, role) in ACCOUNTS {
        access.register(
            username.to_owned(),
            SecretString::from(password),
            email.to_owned(),
            role,
        )?;
    }

    info!(
        products = stores.catalog().len(),
        accounts = stores.accounts().len(),
        "Demo data loaded"
    );
    Ok(())
}
