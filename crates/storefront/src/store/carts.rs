//! Per-account shopping carts.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::{debug, info};

use shopmock_core::{ProductId, UserId};

use super::{CatalogStore, StoreError};
use crate::models::{Cart, LineItem};

/// Store holding one cart per account.
#[derive(Debug, Default)]
pub struct CartLedger {
    carts: RwLock<HashMap<UserId, Cart>>,
}

impl CartLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Materialise an empty cart for a new account. Existing carts are kept.
    pub fn open(&self, user: UserId) {
        self.carts.write().entry(user).or_default();
    }

    /// The account's cart, or an empty one if none exists.
    #[must_use]
    pub fn view(&self, user: UserId) -> Cart {
        self.carts.read().get(&user).cloned().unwrap_or_default()
    }

    /// Append a line to the account's cart and grow its total by
    /// `price * quantity` at the product's current price.
    ///
    /// Lines are never merged: adding the same product twice yields two lines.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the product does not exist, or
    /// `StoreError::Validation` if the total would overflow.
    pub fn add_item(
        &self,
        catalog: &CatalogStore,
        user: UserId,
        item: LineItem,
    ) -> Result<Cart, StoreError> {
        let price = catalog
            .price_of(item.product_id)
            .ok_or_else(|| StoreError::not_found("Product"))?;
        let line_total = price
            .checked_times(item.quantity)
            .ok_or_else(|| StoreError::Validation("Cart total is too large".to_owned()))?;

        let mut carts = self.carts.write();
        let cart = carts.entry(user).or_default();
        let total = cart
            .total
            .checked_add(line_total)
            .ok_or_else(|| StoreError::Validation("Cart total is too large".to_owned()))?;
        cart.items.push(item);
        cart.total = total;

        info!(
            user_id = %user,
            product_id = %item.product_id,
            quantity = %item.quantity,
            total = %cart.total,
            "Item added to cart"
        );
        Ok(cart.clone())
    }

    /// Remove every line for `product_id` from the account's cart.
    ///
    /// The running total is not reduced, so it is stale after a removal.
    /// Removing a product that is not in the cart is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the account has no cart.
    pub fn remove_item(&self, user: UserId, product_id: ProductId) -> Result<Cart, StoreError> {
        let mut carts = self.carts.write();
        let cart = carts
            .get_mut(&user)
            .ok_or_else(|| StoreError::not_found("Cart"))?;

        let before = cart.items.len();
        cart.items.retain(|item| item.product_id != product_id);

        debug!(
            user_id = %user,
            product_id = %product_id,
            removed = before - cart.items.len(),
            "Item removed from cart"
        );
        Ok(cart.clone())
    }
}
