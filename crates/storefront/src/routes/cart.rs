//! Cart route handlers. Every route acts on the caller's own cart.

use axum::{Json, extract::State};
use serde::Deserialize;
use tracing::instrument;

use shopmock_core::ProductId;

use crate::error::Result;
use crate::extract::ApiJson;
use crate::middleware::RequireAuth;
use crate::models::{Cart, LineItem};
use crate::routes::MessageResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFromCartRequest {
    pub product_id: ProductId,
}

/// Show the caller's cart.
#[instrument(skip_all, fields(user_id = %account.id))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(account): RequireAuth,
) -> Json<Cart> {
    Json(state.stores().carts().view(account.id))
}

/// Add a line to the caller's cart.
#[instrument(skip_all, fields(user_id = %account.id))]
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(account): RequireAuth,
    ApiJson(item): ApiJson<LineItem>,
) -> Result<Json<MessageResponse>> {
    let stores = state.stores();
    stores.carts().add_item(stores.catalog(), account.id, item)?;
    Ok(Json(MessageResponse::new("Product added to cart.")))
}

/// Remove every line for a product from the caller's cart.
#[instrument(skip_all, fields(user_id = %account.id))]
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(account): RequireAuth,
    ApiJson(request): ApiJson<RemoveFromCartRequest>,
) -> Result<Json<MessageResponse>> {
    state
        .stores()
        .carts()
        .remove_item(account.id, request.product_id)?;
    Ok(Json(MessageResponse::new("Product removed from cart.")))
}
