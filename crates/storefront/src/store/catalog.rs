//! Product catalog.

use std::collections::BTreeMap;

use parking_lot::RwLock;
use tracing::info;

use shopmock_core::{IdSequence, Price, ProductId};

use super::StoreError;
use crate::models::{LineItem, NewProduct, Product, ProductChanges};

/// Store holding every product, keyed by id.
#[derive(Debug, Default)]
pub struct CatalogStore {
    inner: RwLock<Catalog>,
}

#[derive(Debug, Default)]
struct Catalog {
    products: BTreeMap<ProductId, Product>,
    ids: IdSequence,
}

impl CatalogStore {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All products in ascending id order.
    #[must_use]
    pub fn list(&self) -> Vec<Product> {
        self.inner.read().products.values().cloned().collect()
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().products.len()
    }

    /// Whether the catalog holds no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get a product by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no product has this id.
    pub fn get(&self, id: ProductId) -> Result<Product, StoreError> {
        self.inner
            .read()
            .products
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Product"))
    }

    /// Current price of a product, if it exists.
    #[must_use]
    pub fn price_of(&self, id: ProductId) -> Option<Price> {
        self.inner.read().products.get(&id).map(|p| p.price)
    }

    /// Add a product under the next id.
    pub fn create(&self, new: NewProduct) -> Product {
        let mut catalog = self.inner.write();
        let id: ProductId = catalog.ids.issue();
        let product = Product::from_new(id, new);
        catalog.products.insert(id, product.clone());

        info!(product_id = %id, title = %product.title, "Product created");
        product
    }

    /// Merge `changes` into an existing product.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no product has this id.
    pub fn update(&self, id: ProductId, changes: ProductChanges) -> Result<Product, StoreError> {
        let unchanged = changes.is_empty();
        let mut catalog = self.inner.write();
        let product = catalog
            .products
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("Product"))?;
        product.apply(changes);

        info!(product_id = %id, unchanged, "Product updated");
        Ok(product.clone())
    }

    /// Remove a product.
    ///
    /// Carts and orders that reference it are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no product has this id.
    pub fn delete(&self, id: ProductId) -> Result<(), StoreError> {
        self.inner
            .write()
            .products
            .remove(&id)
            .ok_or_else(|| StoreError::not_found("Product"))?;

        info!(product_id = %id, "Product deleted");
        Ok(())
    }

    /// Total price of `items` at current prices.
    ///
    /// Every line is priced under one read lock, so the total reflects a
    /// single consistent view of the catalog.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` if a line references an unknown
    /// product or the total overflows.
    pub fn price_lines(&self, items: &[LineItem]) -> Result<Price, StoreError> {
        let catalog = self.inner.read();
        items.iter().try_fold(Price::ZERO, |total, item| {
            let product = catalog.products.get(&item.product_id).ok_or_else(|| {
                StoreError::Validation(format!("Product {} not found", item.product_id))
            })?;
            product
                .price
                .checked_times(item.quantity)
                .and_then(|line| total.checked_add(line))
                .ok_or_else(|| StoreError::Validation("Order total is too large".to_owned()))
        })
    }
}
