//! Product domain types.

use serde::Serialize;
use serde_json::{Map, Value};

use shopmock_core::{Price, PriceError, ProductId};

use super::{ValidationError, optional_string, string_value};

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub price: Price,
    /// Informational only; never decremented by carts or orders.
    pub stock: u64,
    pub category: String,
}

impl Product {
    /// Build a product record from validated fields.
    #[must_use]
    pub fn from_new(id: ProductId, new: NewProduct) -> Self {
        Self {
            id,
            title: new.title,
            description: new.description,
            price: new.price,
            stock: new.stock,
            category: new.category,
        }
    }

    /// Merge a set of changes into this record.
    ///
    /// Fields absent from `changes` keep their current value.
    pub fn apply(&mut self, changes: ProductChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        if let Some(stock) = changes.stock {
            self.stock = stock;
        }
        if let Some(category) = changes.category {
            self.category = category;
        }
    }
}

/// Validated input for creating a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub title: String,
    pub description: String,
    pub price: Price,
    pub stock: u64,
    pub category: String,
}

impl NewProduct {
    /// Validate a product creation body.
    ///
    /// Presence of every required field is checked first (the first missing
    /// field is reported), then the field types.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` naming the first offending field.
    pub fn from_json(body: &Map<String, Value>) -> Result<Self, ValidationError> {
        let title = required(body, "title")?;
        let description = required(body, "description")?;
        let price = required(body, "price")?;
        let stock = required(body, "stock")?;
        let category = required(body, "category")?;

        Ok(Self {
            title: string_value("title", title)?,
            description: string_value("description", description)?,
            price: parse_price(price)?,
            stock: parse_stock(stock)?,
            category: string_value("category", category)?,
        })
    }
}

/// A validated partial update to a product.
///
/// Only the known product fields are recognised; any other key in the body,
/// including `id`, is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Price>,
    pub stock: Option<u64>,
    pub category: Option<String>,
}

impl ProductChanges {
    /// Validate an update body.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if a recognised field has the wrong type.
    pub fn from_json(body: &Map<String, Value>) -> Result<Self, ValidationError> {
        Ok(Self {
            title: optional_string(body, "title")?,
            description: optional_string(body, "description")?,
            price: body.get("price").map(parse_price).transpose()?,
            stock: body.get("stock").map(parse_stock).transpose()?,
            category: optional_string(body, "category")?,
        })
    }

    /// Whether the update carries no recognised field.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.stock.is_none()
            && self.category.is_none()
    }
}

fn required<'a>(body: &'a Map<String, Value>, field: &str) -> Result<&'a Value, ValidationError> {
    body.get(field)
        .ok_or_else(|| ValidationError::new(format!("'{field}' is required")))
}

fn parse_price(value: &Value) -> Result<Price, ValidationError> {
    let Value::Number(number) = value else {
        return Err(ValidationError::wrong_type("price", "a number"));
    };
    number.to_string().parse::<Price>().map_err(|e| match e {
        PriceError::Negative => ValidationError::new("'price' must not be negative"),
        PriceError::Overflow => ValidationError::new("'price' is too large"),
        PriceError::Invalid(_) => ValidationError::wrong_type("price", "a number"),
    })
}

fn parse_stock(value: &Value) -> Result<u64, ValidationError> {
    match value {
        Value::Number(number) if number.is_u64() => number
            .as_u64()
            .ok_or_else(|| ValidationError::wrong_type("stock", "an integer")),
        Value::Number(number) if number.is_i64() => {
            Err(ValidationError::new("'stock' must not be negative"))
        }
        _ => Err(ValidationError::wrong_type("stock", "an integer")),
    }
}
