//! chatd-core - In-memory state layer for a chat service.
//!
//! Owns account identity, session tokens, and room membership behind three
//! independently thread-safe registries, composed by a transport-agnostic
//! [`Chat`] facade. There is no backing database: all state lives in
//! concurrent maps and dies with the process.
//!
//! ## Layout
//!
//! - [`state::AccountDirectory`]: registered accounts, atomic registration
//! - [`state::SessionStore`]: session tokens with sliding expiration
//! - [`state::RoomRegistry`]: rooms and membership
//! - [`Chat`]: request-level composition of the three
//!
//! Every operation is synchronous and non-blocking; the registries can be
//! called from any thread or async task without further coordination.

pub mod chat;
pub mod config;
pub mod error;
pub mod state;
pub mod token;

pub use chat::{Chat, LoginOutcome};
pub use config::{ConfigError, CoreConfig, SessionConfig};
pub use error::{ChatError, RegistryError};
pub use state::{
    Account, AccountDirectory, DEFAULT_SESSION_WINDOW, Room, RoomRegistry, SessionStore,
    SessionToken,
};
pub use token::{TokenGenerator, UuidTokenGenerator};
