//! Account store.
//!
//! Lookups are linear scans over the accounts; the mock never holds more
//! than a handful of them.

use std::collections::BTreeMap;

use parking_lot::RwLock;
use tracing::info;

use shopmock_core::{IdSequence, UserId};

use super::StoreError;
use crate::models::{Account, AccountProfile, CurrentAccount, NewAccount, ProfileChanges};

/// Store holding every account, keyed by id.
#[derive(Debug, Default)]
pub struct AccountStore {
    inner: RwLock<Accounts>,
}

#[derive(Debug, Default)]
struct Accounts {
    records: BTreeMap<UserId, Account>,
    ids: IdSequence,
}

impl Accounts {
    fn username_taken(&self, username: &str, except: Option<UserId>) -> bool {
        self.records
            .values()
            .any(|a| a.username == username && Some(a.id) != except)
    }
}

impl AccountStore {
    /// Create an empty account store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().records.len()
    }

    /// Whether the store holds no accounts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert an account under the next id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if the username or token is already in
    /// use. Either would let one token resolve to two accounts.
    pub fn insert(&self, new: NewAccount) -> Result<Account, StoreError> {
        let mut accounts = self.inner.write();
        if accounts.username_taken(&new.username, None)
            || accounts.records.values().any(|a| a.token == new.token)
        {
            return Err(StoreError::Conflict("Username already exists".to_owned()));
        }

        let id: UserId = accounts.ids.issue();
        let account = Account::from_new(id, new);
        accounts.records.insert(id, account.clone());

        info!(user_id = %id, username = %account.username, role = %account.role, "Account created");
        Ok(account)
    }

    /// Resolve a bearer token to its account.
    #[must_use]
    pub fn find_by_token(&self, token: &str) -> Option<CurrentAccount> {
        self.inner
            .read()
            .records
            .values()
            .find(|a| a.token == token)
            .map(Account::identity)
    }

    /// Token of the account matching both username and password exactly.
    #[must_use]
    pub fn token_for_credentials(&self, username: &str, password: &str) -> Option<String> {
        self.inner
            .read()
            .records
            .values()
            .find(|a| a.username == username && a.password_matches(password))
            .map(|a| a.token.clone())
    }

    /// First account registered with this email.
    #[must_use]
    pub fn find_by_email(&self, email: &str) -> Option<AccountProfile> {
        self.inner
            .read()
            .records
            .values()
            .find(|a| a.email == email)
            .map(Account::profile)
    }

    /// Public profile of an account.
    #[must_use]
    pub fn profile(&self, id: UserId) -> Option<AccountProfile> {
        self.inner.read().records.get(&id).map(Account::profile)
    }

    /// Merge profile changes into an account.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the account does not exist, or
    /// `StoreError::Conflict` if the new username belongs to another account.
    pub fn update(&self, id: UserId, changes: ProfileChanges) -> Result<AccountProfile, StoreError> {
        let mut accounts = self.inner.write();
        if let Some(username) = changes.username.as_deref()
            && accounts.username_taken(username, Some(id))
        {
            return Err(StoreError::Conflict("Username already exists".to_owned()));
        }

        let account = accounts
            .records
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("User"))?;
        account.apply(changes);

        info!(user_id = %id, "Account profile updated");
        Ok(account.profile())
    }
}
