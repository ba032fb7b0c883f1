//! Product route handlers.
//!
//! Reads are public; create, update and delete require an admin token.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::{Map, Value};
use tracing::instrument;

use shopmock_core::ProductId;

use crate::error::Result;
use crate::extract::{ApiJson, ApiPath};
use crate::middleware::RequireAdmin;
use crate::models::{NewProduct, Product, ProductChanges};
use crate::state::AppState;

/// List every product in ascending id order.
#[instrument(skip_all)]
pub async fn index(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.stores().catalog().list())
}

/// Show one product.
#[instrument(skip_all, fields(product_id = %id))]
pub async fn show(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ProductId>,
) -> Result<Json<Product>> {
    Ok(Json(state.stores().catalog().get(id)?))
}

/// Create a product.
#[instrument(skip_all, fields(admin = %admin.username))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ApiJson(body): ApiJson<Map<String, Value>>,
) -> Result<impl IntoResponse> {
    let new = NewProduct::from_json(&body)?;
    let product = state.stores().catalog().create(new);
    Ok((StatusCode::CREATED, Json(product)))
}

/// Update a product.
///
/// Serves both `PATCH` and `PUT`: either way only the fields present in the
/// body change. An unknown id is reported before the body is validated.
#[instrument(skip_all, fields(product_id = %id, admin = %admin.username))]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ProductId>,
    RequireAdmin(admin): RequireAdmin,
    ApiJson(body): ApiJson<Map<String, Value>>,
) -> Result<Json<Product>> {
    let catalog = state.stores().catalog();
    catalog.get(id)?;

    let changes = ProductChanges::from_json(&body)?;
    Ok(Json(catalog.update(id, changes)?))
}

/// Delete a product.
#[instrument(skip_all, fields(product_id = %id, admin = %admin.username))]
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ProductId>,
    RequireAdmin(admin): RequireAdmin,
) -> Result<StatusCode> {
    state.stores().catalog().delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}
