//! Order route handlers.
//!
//! Orders are priced from the `cartItems` in the request body; the caller's
//! cart is neither read nor cleared.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tracing::instrument;

use shopmock_core::OrderId;

use crate::error::Result;
use crate::extract::{ApiJson, ApiPath};
use crate::middleware::RequireAuth;
use crate::models::{LineItem, Order, OrderReceipt};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub cart_items: Vec<LineItem>,
    /// Kept verbatim; `null` when absent.
    #[serde(default)]
    pub shipping_address: serde_json::Value,
}

/// Place an order.
#[instrument(skip_all, fields(user_id = %account.id, lines = request.cart_items.len()))]
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(account): RequireAuth,
    ApiJson(request): ApiJson<CreateOrderRequest>,
) -> Result<Json<OrderReceipt>> {
    let stores = state.stores();
    let receipt = stores.orders().create(
        stores.catalog(),
        account.id,
        request.cart_items,
        request.shipping_address,
    )?;
    Ok(Json(receipt))
}

/// Show one of the caller's orders.
#[instrument(skip_all, fields(user_id = %account.id, order_id = %id))]
pub async fn show(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<OrderId>,
    RequireAuth(account): RequireAuth,
) -> Result<Json<Order>> {
    Ok(Json(state.stores().orders().get(account.id, id)?))
}

/// Delete one of the caller's orders. Deleting an absent order succeeds.
#[instrument(skip_all, fields(user_id = %account.id, order_id = %id))]
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<OrderId>,
    RequireAuth(account): RequireAuth,
) -> StatusCode {
    state.stores().orders().delete(account.id, id);
    StatusCode::NO_CONTENT
}
