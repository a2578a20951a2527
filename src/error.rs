//! Unified error handling for chatd-core.
//!
//! Registry errors are the typed rejections of the state layer itself;
//! [`ChatError`] is what the request-level facade surfaces to its caller.
//! Expected business conditions never panic: they come back as one of
//! these values, or as an absent `Option` where the operation's contract
//! says the two failure causes must stay indistinguishable.

use thiserror::Error;

/// Errors raised by the state registries.
///
/// Every variant is a local, recoverable rejection: the operation that
/// produced it performed no mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("account already exists: {0}")]
    AccountExists(String),

    #[error("room already exists: {0}")]
    RoomExists(String),
}

impl RegistryError {
    /// Get a static error code string for logging and metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AccountExists(_) => "account_exists",
            Self::RoomExists(_) => "room_exists",
        }
    }
}

/// Errors surfaced by the [`Chat`](crate::chat::Chat) facade.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    /// Unknown username or wrong password. The two cases are deliberately
    /// indistinguishable so a caller cannot probe which usernames exist.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The token is unknown, or its expiration window has elapsed. Also
    /// indistinguishable on purpose.
    #[error("invalid or expired session")]
    InvalidSession,

    #[error("no such room: {0}")]
    NoSuchRoom(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl ChatError {
    /// Get a static error code string for logging and metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "invalid_credentials",
            Self::InvalidSession => "invalid_session",
            Self::NoSuchRoom(_) => "no_such_room",
            Self::Registry(err) => err.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_error_codes() {
        assert_eq!(
            RegistryError::AccountExists("alice".into()).error_code(),
            "account_exists"
        );
        assert_eq!(
            RegistryError::RoomExists("general".into()).error_code(),
            "room_exists"
        );
    }

    #[test]
    fn test_chat_error_codes() {
        assert_eq!(ChatError::InvalidCredentials.error_code(), "invalid_credentials");
        assert_eq!(ChatError::InvalidSession.error_code(), "invalid_session");
        assert_eq!(ChatError::NoSuchRoom("x".into()).error_code(), "no_such_room");
        // Registry rejections keep their own label through the facade.
        let wrapped = ChatError::from(RegistryError::AccountExists("alice".into()));
        assert_eq!(wrapped.error_code(), "account_exists");
    }

    #[test]
    fn test_display_does_not_leak_failure_cause() {
        // Both credential failures render the same message.
        assert_eq!(ChatError::InvalidCredentials.to_string(), "invalid credentials");
        assert_eq!(ChatError::InvalidSession.to_string(), "invalid or expired session");
    }
}
