//! State management module.
//!
//! Contains the three registries that hold all live chat state: accounts,
//! sessions, and rooms. Each registry is independently thread-safe and
//! hands out value copies, never references into its internal maps.

mod accounts;
mod rooms;
mod sessions;

pub use accounts::{Account, AccountDirectory};
pub use rooms::{Room, RoomRegistry};
pub use sessions::{DEFAULT_SESSION_WINDOW, SessionStore, SessionToken};
