//! Access control service.
//!
//! Resolves bearer tokens to accounts, enforces role and ownership checks,
//! and handles login, registration and profile changes.
//!
//! Tokens are deterministic (`<username>_token`), issued once at registration
//! and never rotated; login just hands back the account's token.

mod error;

pub use error::AccessError;

use secrecy::SecretString;
use serde_json::{Map, Value};
use tracing::{info, warn};

use shopmock_core::{Role, UserId};

use crate::models::{AccountProfile, CurrentAccount, NewAccount, ProfileChanges};
use crate::store::{AccountStore, CartLedger, OrderLedger, StoreError, Stores};

/// Authentication scheme accepted in the `Authorization` header.
pub const BEARER_SCHEME: &str = "Bearer";

/// What an operation demands of the authenticated account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Any account with a valid token.
    AnyAuthenticated,
    /// The account must have the admin role.
    AdminRole,
    /// The account must be the one with this id.
    SelfOwnership(UserId),
}

/// Extract the token from an `Authorization` header value.
///
/// The value must split on whitespace into exactly two parts, the first being
/// `Bearer`.
///
/// # Errors
///
/// Returns `AccessError::MissingOrMalformedToken` for an absent header or any
/// other shape.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AccessError> {
    let header = header.ok_or(AccessError::MissingOrMalformedToken)?;
    let mut parts = header.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(BEARER_SCHEME), Some(token), None) => Ok(token),
        _ => Err(AccessError::MissingOrMalformedToken),
    }
}

/// Check an authenticated account against a requirement.
///
/// # Errors
///
/// Returns `AccessError::Forbidden` if the requirement is not met.
pub fn authorize(account: &CurrentAccount, requirement: Requirement) -> Result<(), AccessError> {
    let allowed = match requirement {
        Requirement::AnyAuthenticated => true,
        Requirement::AdminRole => account.role.is_admin(),
        Requirement::SelfOwnership(target) => account.id == target,
    };

    if allowed {
        Ok(())
    } else {
        warn!(
            user_id = %account.id,
            role = %account.role,
            ?requirement,
            "Access denied"
        );
        Err(AccessError::Forbidden)
    }
}

/// Access control service.
///
/// Borrows the account store, plus the cart and order ledgers so that
/// registration can materialise the new account's cart and order book.
pub struct AccessControl<'a> {
    accounts: &'a AccountStore,
    carts: &'a CartLedger,
    orders: &'a OrderLedger,
}

impl<'a> AccessControl<'a> {
    /// Create a new access control service over the shop's stores.
    #[must_use]
    pub const fn new(stores: &'a Stores) -> Self {
        Self {
            accounts: stores.accounts(),
            carts: stores.carts(),
            orders: stores.orders(),
        }
    }

    /// Resolve an `Authorization` header value to an account.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::MissingOrMalformedToken` if the header is absent or
    /// malformed, or `AccessError::UnknownToken` if no account holds the token.
    pub fn authenticate(&self, header: Option<&str>) -> Result<CurrentAccount, AccessError> {
        let token = bearer_token(header)?;
        self.accounts
            .find_by_token(token)
            .ok_or(AccessError::UnknownToken)
    }

    /// Resolve a header and check the result against `requirement`.
    ///
    /// # Errors
    ///
    /// Any error from [`authenticate`](Self::authenticate) or [`authorize`].
    pub fn require(
        &self,
        header: Option<&str>,
        requirement: Requirement,
    ) -> Result<CurrentAccount, AccessError> {
        let account = self.authenticate(header)?;
        authorize(&account, requirement)?;
        Ok(account)
    }

    // =========================================================================
    // Credentials
    // =========================================================================

    /// Exchange a username and password for the account's token.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::InvalidCredentials` unless both match one account
    /// exactly.
    pub fn login(&self, username: &str, password: &str) -> Result<String, AccessError> {
        let token = self
            .accounts
            .token_for_credentials(username, password)
            .ok_or(AccessError::InvalidCredentials)?;

        info!(username = %username, "Login succeeded");
        Ok(token)
    }

    /// Register a new account.
    ///
    /// Issues the token `<username>_token` and opens an empty cart and order
    /// book for the new account.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::UsernameTaken` if the username is in use, or a
    /// validation error if it is empty or contains whitespace (such a token
    /// could never be presented as `Bearer <token>`).
    pub fn register(
        &self,
        username: String,
        password: SecretString,
        email: String,
        role: Role,
    ) -> Result<AccountProfile, AccessError> {
        if username.is_empty() || username.chars().any(char::is_whitespace) {
            return Err(StoreError::Validation(
                "'username' must be non-empty and contain no whitespace".to_owned(),
            )
            .into());
        }

        let token = format!("{username}_token");
        let account = self
            .accounts
            .insert(NewAccount {
                username,
                password,
                email,
                role,
                token,
            })
            .map_err(|e| match e {
                StoreError::Conflict(_) => AccessError::UsernameTaken,
                other => AccessError::Store(other),
            })?;

        self.carts.open(account.id);
        self.orders.open(account.id);

        Ok(account.profile())
    }

    // =========================================================================
    // Profile
    // =========================================================================

    /// Update the profile of account `target` on behalf of `caller`.
    ///
    /// The target is looked up before ownership is checked, and the body is
    /// only read once both pass. An unknown id reports not-found even to
    /// another account, and a non-owner is refused whatever the body holds.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::UserNotFound` if the target does not exist,
    /// `AccessError::Forbidden` if the caller is someone else, a validation
    /// error if a recognised field has the wrong type, and
    /// `AccessError::UsernameTaken` if the new username is in use.
    pub fn update_profile(
        &self,
        caller: &CurrentAccount,
        target: UserId,
        body: &Map<String, Value>,
    ) -> Result<AccountProfile, AccessError> {
        if self.accounts.profile(target).is_none() {
            return Err(AccessError::UserNotFound);
        }
        authorize(caller, Requirement::SelfOwnership(target))?;

        let changes =
            ProfileChanges::from_json(body).map_err(|e| StoreError::Validation(e.0))?;

        self.accounts.update(target, changes).map_err(|e| match e {
            StoreError::Conflict(_) => AccessError::UsernameTaken,
            StoreError::NotFound(_) => AccessError::UserNotFound,
            other => AccessError::Store(other),
        })
    }

    /// Start a password reset for the account registered with `email`.
    ///
    /// No mail is sent and no state changes; the request is only logged.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::EmailNotFound` if no account has this email.
    pub fn reset_password(&self, email: &str) -> Result<AccountProfile, AccessError> {
        let profile = self
            .accounts
            .find_by_email(email)
            .ok_or(AccessError::EmailNotFound)?;

        info!(user_id = %profile.id, "Password reset requested");
        Ok(profile)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn body(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn register(access: &AccessControl<'_>, username: &str, role: Role) -> AccountProfile {
        access
            .register(
                username.to_owned(),
                SecretString::from(format!("{username}password")),
                format!("{username}@example.com"),
                role,
            )
            .unwrap()
    }

    #[test]
    fn test_bearer_token_shapes() {
        assert_eq!(bearer_token(Some("Bearer abc")), Ok("abc"));
        assert_eq!(bearer_token(Some("Bearer   abc")), Ok("abc"));
        assert_eq!(bearer_token(None), Err(AccessError::MissingOrMalformedToken));
        for bad in ["", "Bearer", "abc", "Basic abc", "bearer abc", "Bearer a b"] {
            assert_eq!(
                bearer_token(Some(bad)),
                Err(AccessError::MissingOrMalformedToken),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_authorize_requirements() {
        let admin = CurrentAccount {
            id: UserId::new(1),
            username: "admin".into(),
            role: Role::Admin,
        };
        let user = CurrentAccount {
            id: UserId::new(2),
            username: "user1".into(),
            role: Role::User,
        };

        assert!(authorize(&user, Requirement::AnyAuthenticated).is_ok());
        assert!(authorize(&admin, Requirement::AdminRole).is_ok());
        assert_eq!(
            authorize(&user, Requirement::AdminRole),
            Err(AccessError::Forbidden)
        );
        assert!(authorize(&user, Requirement::SelfOwnership(UserId::new(2))).is_ok());
        assert_eq!(
            authorize(&admin, Requirement::SelfOwnership(UserId::new(2))),
            Err(AccessError::Forbidden)
        );
    }

    #[test]
    fn test_register_issues_token_and_opens_ledgers() {
        let stores = Stores::new();
        let access = AccessControl::new(&stores);

        let profile = register(&access, "carol", Role::User);
        assert_eq!(profile.id, UserId::new(1));

        let me = access.authenticate(Some("Bearer carol_token")).unwrap();
        assert_eq!(me.id, profile.id);
        assert!(stores.carts().remove_item(profile.id, 1.into()).is_ok());
        assert!(!stores.orders().delete(profile.id, 1.into()));
    }

    #[test]
    fn test_register_duplicate_username() {
        let stores = Stores::new();
        let access = AccessControl::new(&stores);
        register(&access, "carol", Role::User);

        let err = access
            .register(
                "carol".into(),
                SecretString::from("other"),
                "other@example.com".into(),
                Role::User,
            )
            .unwrap_err();
        assert_eq!(err, AccessError::UsernameTaken);
    }

    #[test]
    fn test_register_rejects_whitespace_username() {
        let stores = Stores::new();
        let access = AccessControl::new(&stores);
        let err = access
            .register(
                "two words".into(),
                SecretString::from("pw"),
                "x@example.com".into(),
                Role::User,
            )
            .unwrap_err();
        assert!(matches!(err, AccessError::Store(StoreError::Validation(_))));
        assert!(stores.accounts().is_empty());
    }

    #[test]
    fn test_authenticate_unknown_token() {
        let stores = Stores::new();
        let access = AccessControl::new(&stores);
        assert_eq!(
            access.authenticate(Some("Bearer nobody_token")),
            Err(AccessError::UnknownToken)
        );
    }

    #[test]
    fn test_login_returns_fixed_token() {
        let stores = Stores::new();
        let access = AccessControl::new(&stores);
        register(&access, "dave", Role::User);

        assert_eq!(access.login("dave", "davepassword").unwrap(), "dave_token");
        assert_eq!(access.login("dave", "davepassword").unwrap(), "dave_token");
        assert_eq!(
            access.login("dave", "nope"),
            Err(AccessError::InvalidCredentials)
        );
    }

    #[test]
    fn test_update_profile_checks_existence_then_ownership() {
        let stores = Stores::new();
        let access = AccessControl::new(&stores);
        let erin = register(&access, "erin", Role::User);
        let frank = register(&access, "frank", Role::User);
        let caller = access.authenticate(Some("Bearer erin_token")).unwrap();
        let bad_body = body(json!({ "email": 5 }));

        assert_eq!(
            access
                .update_profile(&caller, UserId::new(99), &bad_body)
                .unwrap_err(),
            AccessError::UserNotFound
        );
        assert_eq!(
            access.update_profile(&caller, frank.id, &bad_body).unwrap_err(),
            AccessError::Forbidden
        );
        assert!(matches!(
            access.update_profile(&caller, erin.id, &bad_body),
            Err(AccessError::Store(StoreError::Validation(_)))
        ));

        let updated = access
            .update_profile(&caller, erin.id, &body(json!({ "email": "erin@new.example" })))
            .unwrap();
        assert_eq!(updated.email, "erin@new.example");
    }

    #[test]
    fn test_reset_password() {
        let stores = Stores::new();
        let access = AccessControl::new(&stores);
        register(&access, "gina", Role::User);

        assert!(access.reset_password("gina@example.com").is_ok());
        assert_eq!(
            access.reset_password("missing@example.com"),
            Err(AccessError::EmailNotFound)
        );
    }
}
