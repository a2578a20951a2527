//! Request-level chat operations composed over the state registries.
//!
//! [`Chat`] is the stateless facade a transport layer calls into: plain
//! values in, plain values out, no wire types anywhere. The registries are
//! constructed by the embedding process and injected here, never reached
//! through globals, so every test gets a fresh world per instance.

use crate::config::CoreConfig;
use crate::error::ChatError;
use crate::state::{Account, AccountDirectory, Room, RoomRegistry, SessionStore, SessionToken};
use crate::token::{TokenGenerator, UuidTokenGenerator};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Result of a combined login-or-register call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    /// The freshly issued session token.
    pub token: SessionToken,
    /// Whether the account was registered as part of this call.
    pub account_created: bool,
}

/// Transport-agnostic chat service facade.
pub struct Chat {
    accounts: AccountDirectory,
    sessions: SessionStore,
    rooms: RoomRegistry,
}

impl Chat {
    /// Compose a facade from explicitly constructed registries.
    pub fn new(accounts: AccountDirectory, sessions: SessionStore, rooms: RoomRegistry) -> Self {
        Self {
            accounts,
            sessions,
            rooms,
        }
    }

    /// Fresh registries with the configured session window and the default
    /// token generator.
    pub fn from_config(config: &CoreConfig) -> Self {
        Self::with_generator(config, Arc::new(UuidTokenGenerator))
    }

    /// Fresh registries with a caller-supplied token generator.
    pub fn with_generator(config: &CoreConfig, generator: Arc<dyn TokenGenerator>) -> Self {
        Self::new(
            AccountDirectory::new(),
            SessionStore::with_window(generator, config.session.window()),
            RoomRegistry::new(),
        )
    }

    /// The account directory.
    pub fn accounts(&self) -> &AccountDirectory {
        &self.accounts
    }

    /// The session store.
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// The room registry.
    pub fn rooms(&self) -> &RoomRegistry {
        &self.rooms
    }

    /// Register a new account.
    pub fn register(&self, username: &str, password: &str) -> Result<Account, ChatError> {
        Ok(self.accounts.register(username, password)?)
    }

    /// Authenticate and issue a session token.
    pub fn login(&self, username: &str, password: &str) -> Result<SessionToken, ChatError> {
        let account = self
            .accounts
            .authenticate(username, password)
            .ok_or(ChatError::InvalidCredentials)?;
        let token = self.sessions.issue(&account);
        info!(username = %username, "user logged in");
        Ok(token)
    }

    /// Log in, registering the account first when the username is unknown.
    ///
    /// A concurrent registration of the same username can slip in between
    /// the existence check and our own `register`; that path falls through
    /// to plain authentication instead of surfacing a conflict the caller
    /// never caused.
    pub fn login_or_register(
        &self,
        username: &str,
        password: &str,
    ) -> Result<LoginOutcome, ChatError> {
        let account_created = if self.accounts.exists(username) {
            false
        } else {
            match self.accounts.register(username, password) {
                Ok(_) => {
                    debug!(username = %username, "unknown username, registered before login");
                    true
                }
                Err(_) => false,
            }
        };
        let token = self.login(username, password)?;
        Ok(LoginOutcome {
            token,
            account_created,
        })
    }

    /// Create a room on behalf of the session holder.
    pub fn create_room(
        &self,
        token: &SessionToken,
        name: &str,
        description: Option<String>,
    ) -> Result<Room, ChatError> {
        let account = self.require_session(token)?;
        Ok(self.rooms.create(&account, name, description)?)
    }

    /// Snapshot of every room.
    pub fn list_rooms(&self, token: &SessionToken) -> Result<HashSet<Room>, ChatError> {
        self.require_session(token)?;
        Ok(self.rooms.all())
    }

    /// Join a room by name.
    pub fn join_room(&self, token: &SessionToken, name: &str) -> Result<Room, ChatError> {
        let account = self.require_session(token)?;
        let room = self
            .rooms
            .get(name)
            .ok_or_else(|| ChatError::NoSuchRoom(name.to_string()))?;
        self.rooms.join(&account, &room);
        Ok(room)
    }

    /// Snapshot of every room the session holder is in.
    pub fn my_rooms(&self, token: &SessionToken) -> Result<HashSet<Room>, ChatError> {
        let account = self.require_session(token)?;
        Ok(self.rooms.rooms_of(&account))
    }

    /// Resolve the session or reject the request.
    fn require_session(&self, token: &SessionToken) -> Result<Account, ChatError> {
        self.sessions.validate(token).ok_or_else(|| {
            debug!("request rejected, invalid or expired session");
            ChatError::InvalidSession
        })
    }
}
