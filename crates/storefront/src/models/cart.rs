//! Cart domain types.

use serde::{Deserialize, Serialize};

use shopmock_core::{Price, ProductId, Quantity};

/// One line of a cart or order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: ProductId,
    pub quantity: Quantity,
}

/// A shopping cart.
///
/// `total` is a running accumulator: it grows on every add and is left as is
/// when lines are removed, so after a removal it no longer equals the sum of
/// `items`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cart {
    pub items: Vec<LineItem>,
    pub total: Price,
}
