//! Session store: token issuance and sliding-expiration validation.
//!
//! Expiration is lazy. An entry past its window is treated as absent at
//! validation time and removed then; no background sweep is required for
//! correctness. [`SessionStore::purge_expired`] exists only to bound
//! memory in long-lived processes.

use crate::state::Account;
use crate::token::TokenGenerator;
use dashmap::DashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// How long a session survives without a successful validation.
pub const DEFAULT_SESSION_WINDOW: Duration = Duration::from_secs(600);

/// An opaque session token handed to a logged-in caller.
///
/// The value is the whole identity: two tokens with the same value are the
/// same session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionToken {
    /// The raw token string.
    pub value: String,
}

impl From<String> for SessionToken {
    fn from(value: String) -> Self {
        Self { value }
    }
}

impl From<&str> for SessionToken {
    fn from(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// A live token binding. `last_access` restarts on every successful
/// validation.
struct SessionEntry {
    account: Account,
    last_access: Instant,
}

/// Issues and validates session tokens with sliding expiration.
pub struct SessionStore {
    sessions: DashMap<String, SessionEntry>,
    window: Duration,
    generator: Arc<dyn TokenGenerator>,
}

impl SessionStore {
    /// Create a store with the default ten-minute window.
    pub fn new(generator: Arc<dyn TokenGenerator>) -> Self {
        Self::with_window(generator, DEFAULT_SESSION_WINDOW)
    }

    /// Create a store with a custom expiration window.
    pub fn with_window(generator: Arc<dyn TokenGenerator>, window: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            window,
            generator,
        }
    }

    /// The configured expiration window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Issue a fresh token bound to `account`.
    ///
    /// Uniqueness comes from the generator's contract; the store performs
    /// no collision check. If a collision ever happened, the previous
    /// binding would be silently overwritten.
    pub fn issue(&self, account: &Account) -> SessionToken {
        let token = SessionToken::from(self.generator.generate());
        self.sessions.insert(
            token.value.clone(),
            SessionEntry {
                account: account.clone(),
                last_access: Instant::now(),
            },
        );
        debug!(username = %account.username, "session issued");
        token
    }

    /// Resolve a token to its account, restarting the expiration window.
    ///
    /// Returns `None` for an unknown token and for an expired one alike.
    /// The elapsed-time check and the refresh happen under the entry's
    /// exclusive guard, so one decision never mixes a stale and a fresh
    /// `last_access`.
    pub fn validate(&self, token: &SessionToken) -> Option<Account> {
        {
            let mut entry = self.sessions.get_mut(&token.value)?;
            if entry.last_access.elapsed() < self.window {
                entry.last_access = Instant::now();
                return Some(entry.account.clone());
            }
        }
        // Expired. The guard above must be out of scope before the remove,
        // which takes the same shard lock.
        self.sessions.remove(&token.value);
        trace!(token = %token, "session expired");
        None
    }

    /// Drop every entry whose window has elapsed.
    ///
    /// Returns the number of entries removed. Purely a memory bound:
    /// validation already treats expired entries as absent.
    pub fn purge_expired(&self) -> usize {
        let mut removed = 0;
        self.sessions.retain(|_, entry| {
            let live = entry.last_access.elapsed() < self.window;
            if !live {
                removed += 1;
            }
            live
        });
        if removed > 0 {
            debug!(removed, "purged expired sessions");
        }
        removed
    }

    /// Number of stored sessions, expired-but-unpurged entries included.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the store holds no sessions at all.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
