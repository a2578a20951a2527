//! Session token generation.
//!
//! The store treats token strings as opaque and leans entirely on the
//! generator for uniqueness, so the generator sits behind a trait: the
//! embedding process can swap in a hardened source without touching the
//! registries.

use uuid::Uuid;

/// Source of opaque session token strings.
///
/// Each call must return a fresh value with negligible collision
/// probability across the process lifetime. Nothing here is required to be
/// cryptographically secure, though production deployments should upgrade
/// to a vetted source.
pub trait TokenGenerator: Send + Sync {
    /// Produce a fresh opaque token string.
    fn generate(&self) -> String;
}

/// Default generator minting UUIDv4 values.
///
/// 122 random bits per token; collisions are astronomically unlikely.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidTokenGenerator;

impl TokenGenerator for UuidTokenGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn tokens_are_nonempty_and_distinct() {
        let generator = UuidTokenGenerator;
        let tokens: HashSet<String> = (0..100).map(|_| generator.generate()).collect();
        assert_eq!(tokens.len(), 100);
        assert!(tokens.iter().all(|t| !t.is_empty()));
    }

    #[test]
    fn tokens_are_fixed_width_hex() {
        let token = UuidTokenGenerator.generate();
        assert_eq!(token.len(), 32);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
