//! Bearer token authentication extractors.
//!
//! Both extractors read the `Authorization` header, resolve the token through
//! [`AccessControl`] and reject with an [`AppError`]: 401 for an absent or
//! malformed header, 403 for an unknown token or a missing role.
//!
//! They only look at request parts, so in a handler they run before any body
//! extractor and a bad header is reported before the body is validated.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::error::{AppError, set_sentry_user};
use crate::models::CurrentAccount;
use crate::services::{AccessControl, Requirement};
use crate::state::AppState;

/// Extractor that requires a valid bearer token.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(account): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", account.username)
/// }
/// ```
pub struct RequireAuth(pub CurrentAccount);

/// Extractor that requires a bearer token belonging to an admin.
pub struct RequireAdmin(pub CurrentAccount);

/// Raw `Authorization` header value, if present and valid UTF-8.
fn authorization_header(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
}

fn resolve(
    parts: &Parts,
    state: &AppState,
    requirement: Requirement,
) -> Result<CurrentAccount, AppError> {
    let account =
        AccessControl::new(state.stores()).require(authorization_header(parts), requirement)?;

    set_sentry_user(&account.id, &account.username);
    tracing::Span::current().record("user_id", account.id.as_i32());
    Ok(account)
}

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        resolve(parts, state, Requirement::AnyAuthenticated).map(Self)
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        resolve(parts, state, Requirement::AdminRole).map(Self)
    }
}
