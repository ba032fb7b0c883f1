//! Domain models for the storefront.
//!
//! These are the records held by the in-memory stores plus the validated
//! input types that handlers build from request bodies.

pub mod account;
pub mod cart;
pub mod order;
pub mod product;

pub use account::{Account, AccountProfile, CurrentAccount, NewAccount, ProfileChanges};
pub use cart::{Cart, LineItem};
pub use order::{Order, OrderReceipt};
pub use product::{NewProduct, Product, ProductChanges};

/// A request body that failed field validation.
///
/// The message is shown to the client verbatim, e.g. `'price' must be a number`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    /// Create a validation error from a message.
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    fn wrong_type(field: &str, expected: &str) -> Self {
        Self(format!("'{field}' must be {expected}"))
    }
}

/// Read a string field from a JSON object, if present.
fn optional_string(
    body: &serde_json::Map<String, serde_json::Value>,
    field: &str,
) -> Result<Option<String>, ValidationError> {
    body.get(field)
        .map(|value| string_value(field, value))
        .transpose()
}

/// Read a JSON value that must be a string.
fn string_value(field: &str, value: &serde_json::Value) -> Result<String, ValidationError> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| ValidationError::wrong_type(field, "a string"))
}
