//! Account directory: username to account mapping with atomic registration.

use crate::error::RegistryError;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::fmt;
use tracing::{debug, info};

/// A registered account.
///
/// Immutable once created; accounts are never deleted, so a username is a
/// stable key for the lifetime of the process.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Account {
    /// Unique username, the primary key.
    pub username: String,
    /// Opaque credential, stored and compared as-is. Hashing is out of
    /// scope for this layer.
    pub password: String,
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Keep the credential out of logs.
        f.debug_struct("Account")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Maps usernames to accounts with atomic uniqueness enforcement.
///
/// All operations are thread-safe. Concurrent registrations for the same
/// username resolve to exactly one winner; the losers see a typed
/// rejection and no state change.
#[derive(Default)]
pub struct AccountDirectory {
    accounts: DashMap<String, Account>,
}

impl AccountDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
        }
    }

    /// Whether an account with `username` is registered.
    pub fn exists(&self, username: &str) -> bool {
        self.accounts.contains_key(username)
    }

    /// Register a new account.
    ///
    /// The existence check and the insert are a single atomic step: the
    /// entry's shard lock is held across both, so a concurrent `register`
    /// for the same username observes either nothing or the finished
    /// account, never an intermediate state.
    pub fn register(&self, username: &str, password: &str) -> Result<Account, RegistryError> {
        match self.accounts.entry(username.to_string()) {
            Entry::Occupied(_) => {
                debug!(username = %username, "registration rejected, username taken");
                Err(RegistryError::AccountExists(username.to_string()))
            }
            Entry::Vacant(slot) => {
                let account = Account {
                    username: username.to_string(),
                    password: password.to_string(),
                };
                slot.insert(account.clone());
                info!(username = %username, "account registered");
                Ok(account)
            }
        }
    }

    /// Look up an account by credentials.
    ///
    /// Returns `None` for an unknown username and for a wrong password
    /// alike; callers cannot tell the two apart. The comparison is plain
    /// string equality and not timing-safe.
    pub fn authenticate(&self, username: &str, password: &str) -> Option<Account> {
        match self.accounts.get(username) {
            Some(account) if account.password == password => Some(account.value().clone()),
            _ => {
                debug!(username = %username, "authentication rejected");
                None
            }
        }
    }

    /// Number of registered accounts.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether no accounts are registered.
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
