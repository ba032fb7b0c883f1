//! Account domain types.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::{Map, Value};

use shopmock_core::{Role, UserId};

use super::{ValidationError, optional_string};

/// A shop account.
///
/// The password is stored as given (this is a mock) but wrapped in a
/// `SecretString` so it never shows up in `Debug` output or logs.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: UserId,
    pub username: String,
    pub password: SecretString,
    pub email: String,
    pub role: Role,
    /// Bearer token issued at registration. Never rotates.
    pub token: String,
}

impl Account {
    /// Build an account record from registration input.
    #[must_use]
    pub fn from_new(id: UserId, new: NewAccount) -> Self {
        Self {
            id,
            username: new.username,
            password: new.password,
            email: new.email,
            role: new.role,
            token: new.token,
        }
    }

    /// Exact-match password comparison.
    #[must_use]
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password.expose_secret() == candidate
    }

    /// Public view of the account.
    #[must_use]
    pub fn profile(&self) -> AccountProfile {
        AccountProfile {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }

    /// Identity attached to an authenticated request.
    #[must_use]
    pub fn identity(&self) -> CurrentAccount {
        CurrentAccount {
            id: self.id,
            username: self.username.clone(),
            role: self.role,
        }
    }

    /// Merge profile changes into this record.
    pub fn apply(&mut self, changes: ProfileChanges) {
        if let Some(username) = changes.username {
            self.username = username;
        }
        if let Some(password) = changes.password {
            self.password = password;
        }
        if let Some(email) = changes.email {
            self.email = email;
        }
    }
}

/// Input for registering an account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub password: SecretString,
    pub email: String,
    pub role: Role,
    pub token: String,
}

/// Public account fields returned by registration and profile updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountProfile {
    pub id: UserId,
    pub username: String,
    pub email: String,
}

/// The account behind a request's bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentAccount {
    pub id: UserId,
    pub username: String,
    pub role: Role,
}

/// A validated profile update.
///
/// Only `username`, `password` and `email` are recognised. `id`, `token`
/// and `role` cannot be changed through a profile update; other keys are
/// ignored.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub username: Option<String>,
    pub password: Option<SecretString>,
    pub email: Option<String>,
}

impl ProfileChanges {
    /// Validate a profile update body.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if a recognised field is not a string or
    /// the new username is empty.
    pub fn from_json(body: &Map<String, Value>) -> Result<Self, ValidationError> {
        let username = optional_string(body, "username")?;
        if username.as_deref().is_some_and(|u| u.trim().is_empty()) {
            return Err(ValidationError::new("'username' cannot be empty"));
        }

        Ok(Self {
            username,
            password: optional_string(body, "password")?.map(SecretString::from),
            email: optional_string(body, "email")?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn account() -> Account {
        Account::from_new(
            UserId::new(2),
            NewAccount {
                username: "user1".into(),
                password: SecretString::from("user1password"),
                email: "user1@example.com".into(),
                role: Role::User,
                token: "user1_token".into(),
            },
        )
    }

    #[test]
    fn test_password_matches_exactly() {
        let account = account();
        assert!(account.password_matches("user1password"));
        assert!(!account.password_matches("USER1PASSWORD"));
        assert!(!account.password_matches(""));
    }

    #[test]
    fn test_debug_redacts_password() {
        let debug = format!("{:?}", account());
        assert!(!debug.contains("user1password"));
        assert!(debug.contains("user1_token"));
    }

    #[test]
    fn test_profile_changes_ignore_protected_fields() {
        let Value::Object(body) = json!({
            "email": "new@example.com",
            "role": "admin",
            "token": "stolen",
            "id": 1
        }) else {
            panic!("expected object");
        };

        let mut account = account();
        account.apply(ProfileChanges::from_json(&body).unwrap());

        assert_eq!(account.email, "new@example.com");
        assert_eq!(account.role, Role::User);
        assert_eq!(account.token, "user1_token");
        assert_eq!(account.id, UserId::new(2));
    }

    #[test]
    fn test_profile_changes_reject_non_string() {
        let Value::Object(body) = json!({"email": 5}) else {
            panic!("expected object");
        };
        let err = ProfileChanges::from_json(&body).unwrap_err();
        assert_eq!(err.to_string(), "'email' must be a string");
    }
}
