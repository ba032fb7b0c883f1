//! Access control error types.

use thiserror::Error;

use crate::store::StoreError;

/// Errors that can occur during authentication and authorization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The `Authorization` header is absent or not `Bearer <token>`.
    #[error("Missing or invalid token")]
    MissingOrMalformedToken,

    /// The bearer token does not belong to any account.
    #[error("Unauthorized access")]
    UnknownToken,

    /// The account lacks the role or ownership the operation requires.
    #[error("Unauthorized access")]
    Forbidden,

    /// Username/password pair does not match any account.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Username is already registered.
    #[error("Username already exists")]
    UsernameTaken,

    /// The addressed account does not exist.
    #[error("User not found")]
    UserNotFound,

    /// No account is registered with the given email.
    #[error("Email not found")]
    EmailNotFound,

    /// Store error.
    #[error(transparent)]
    Store(#[from] StoreError),
}
