//! Account route handlers: registration, login, profile update and password
//! reset.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::instrument;

use shopmock_core::{Role, UserId};

use crate::error::Result;
use crate::extract::{ApiJson, ApiPath};
use crate::middleware::RequireAuth;
use crate::models::AccountProfile;
use crate::routes::MessageResponse;
use crate::services::{AccessControl, AccessError};
use crate::state::AppState;

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: SecretString,
    pub email: String,
    #[serde(default)]
    pub role: Option<Role>,
}

/// Login request body.
///
/// Fields are taken as raw JSON: a missing or non-string value never matches
/// an account. Not `Debug`, since the password is held in the clear.
#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<Value>,
    #[serde(default)]
    pub password: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
}

/// Register a new account.
#[instrument(skip_all, fields(username = %request.username))]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<impl IntoResponse> {
    let profile = AccessControl::new(state.stores()).register(
        request.username,
        request.password,
        request.email,
        request.role.unwrap_or_default(),
    )?;

    tracing::info!(user_id = %profile.id, "Account registered");
    Ok((StatusCode::CREATED, Json(profile)))
}

/// Exchange credentials for the account's bearer token.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<TokenResponse>> {
    let (Some(Value::String(username)), Some(Value::String(password))) =
        (request.username, request.password)
    else {
        return Err(AccessError::InvalidCredentials.into());
    };

    let token = AccessControl::new(state.stores()).login(&username, &password)?;
    Ok(Json(TokenResponse { token }))
}

/// Update the caller's own profile.
#[instrument(skip_all, fields(target = %id, caller = %caller.id))]
pub async fn update_profile(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<UserId>,
    RequireAuth(caller): RequireAuth,
    ApiJson(body): ApiJson<Map<String, Value>>,
) -> Result<Json<AccountProfile>> {
    let profile = AccessControl::new(state.stores()).update_profile(&caller, id, &body)?;
    Ok(Json(profile))
}

/// Request a password reset link.
#[instrument(skip_all)]
pub async fn reset_password(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>> {
    AccessControl::new(state.stores()).reset_password(&request.email)?;
    Ok(Json(MessageResponse::new("Password reset link sent to email.")))
}
