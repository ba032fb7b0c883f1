//! Order domain types.

use serde::Serialize;

use shopmock_core::{OrderId, OrderStatus, Price};

use super::LineItem;

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: OrderId,
    pub status: OrderStatus,
    pub items: Vec<LineItem>,
    pub total: Price,
    /// Stored exactly as the client sent it.
    pub shipping_address: serde_json::Value,
}

impl Order {
    /// Short confirmation returned when the order is placed.
    #[must_use]
    pub const fn receipt(&self) -> OrderReceipt {
        OrderReceipt {
            order_id: self.order_id,
            status: self.status,
        }
    }
}

/// Order confirmation body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    pub order_id: OrderId,
    pub status: OrderStatus,
}
