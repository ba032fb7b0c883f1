//! Per-account order history.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::info;

use shopmock_core::{IdSequence, OrderId, OrderStatus, UserId};

use super::{CatalogStore, StoreError};
use crate::models::{LineItem, Order, OrderReceipt};

/// Store holding the orders of every account.
#[derive(Debug, Default)]
pub struct OrderLedger {
    books: RwLock<HashMap<UserId, OrderBook>>,
}

/// One account's orders. Order ids are scoped to the book.
#[derive(Debug, Default)]
struct OrderBook {
    orders: Vec<Order>,
    ids: IdSequence,
}

impl OrderLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Materialise an empty order book for a new account.
    pub fn open(&self, user: UserId) {
        self.books.write().entry(user).or_default();
    }

    /// Place an order for `items` at current catalog prices.
    ///
    /// The items are taken as given; the account's cart is neither read nor
    /// cleared.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` if an item references an unknown
    /// product. Nothing is recorded in that case.
    pub fn create(
        &self,
        catalog: &CatalogStore,
        user: UserId,
        items: Vec<LineItem>,
        shipping_address: serde_json::Value,
    ) -> Result<OrderReceipt, StoreError> {
        let total = catalog.price_lines(&items)?;

        let mut books = self.books.write();
        let book = books.entry(user).or_default();
        let order = Order {
            order_id: book.ids.issue(),
            status: OrderStatus::Processing,
            items,
            total,
            shipping_address,
        };
        let receipt = order.receipt();
        book.orders.push(order);

        info!(user_id = %user, order_id = %receipt.order_id, total = %total, "Order placed");
        Ok(receipt)
    }

    /// Get one of the account's orders.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the account has no such order.
    pub fn get(&self, user: UserId, order_id: OrderId) -> Result<Order, StoreError> {
        self.books
            .read()
            .get(&user)
            .and_then(|book| book.orders.iter().find(|o| o.order_id == order_id))
            .cloned()
            .ok_or_else(|| StoreError::not_found("Order"))
    }

    /// Delete one of the account's orders.
    ///
    /// Returns whether an order was removed; deleting an absent order is not
    /// an error.
    pub fn delete(&self, user: UserId, order_id: OrderId) -> bool {
        let mut books = self.books.write();
        let Some(book) = books.get_mut(&user) else {
            return false;
        };

        let before = book.orders.len();
        book.orders.retain(|o| o.order_id != order_id);
        let removed = book.orders.len() != before;
        if removed {
            info!(user_id = %user, order_id = %order_id, "Order deleted");
        }
        removed
    }
}
