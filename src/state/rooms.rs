//! Room registry: atomic room creation and membership tracking.

use crate::error::RegistryError;
use crate::state::Account;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// A chat room.
///
/// Immutable once created; rooms are never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Room {
    /// Unique room name, the primary key.
    pub name: String,
    /// Free-form description, if the creator supplied one.
    pub description: Option<String>,
}

/// Shared handle to one room's member set.
type MemberSet = Arc<RwLock<HashSet<String>>>;

/// Owns rooms and room membership.
///
/// Rooms are keyed by name; membership is a room-name to username-set
/// relation (accounts are never deleted, so usernames are stable keys).
/// Member sets sit behind their own lock so joins on different rooms never
/// contend, and no map guard is held while another map is touched.
#[derive(Default)]
pub struct RoomRegistry {
    rooms: DashMap<String, Room>,
    members: DashMap<String, MemberSet>,
}

impl RoomRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
            members: DashMap::new(),
        }
    }

    /// Whether a room named `name` exists.
    pub fn exists(&self, name: &str) -> bool {
        self.rooms.contains_key(name)
    }

    /// Value copy of the room named `name`, if it exists.
    pub fn get(&self, name: &str) -> Option<Room> {
        self.rooms.get(name).map(|room| room.value().clone())
    }

    /// Create a room and enroll `account` as its first member.
    ///
    /// The existence check and the insert are one atomic step on the rooms
    /// map: of N concurrent creates for one name, exactly one wins. A
    /// losing call leaves no trace, membership included. The membership
    /// insert is a separate step, but the room is not visible to anyone
    /// until the winning insert completes, so no caller can observe the
    /// gap.
    pub fn create(
        &self,
        account: &Account,
        name: &str,
        description: Option<String>,
    ) -> Result<Room, RegistryError> {
        let room = Room {
            name: name.to_string(),
            description,
        };
        match self.rooms.entry(name.to_string()) {
            Entry::Occupied(_) => {
                debug!(room = %name, "room creation rejected, name taken");
                return Err(RegistryError::RoomExists(name.to_string()));
            }
            Entry::Vacant(slot) => {
                slot.insert(room.clone());
            }
        }
        self.join(account, &room);
        info!(room = %room.name, creator = %account.username, "room created");
        Ok(room)
    }

    /// Add `account` to `room`'s member set.
    ///
    /// Idempotent and infallible. `room` must have come from a successful
    /// [`create`](Self::create) or a registry lookup; this method does not
    /// re-resolve names.
    pub fn join(&self, account: &Account, room: &Room) {
        let members = Arc::clone(
            &self
                .members
                .entry(room.name.clone())
                .or_insert_with(|| Arc::new(RwLock::new(HashSet::new()))),
        );
        // The shard guard is gone; only the per-room lock is held now.
        let joined = members.write().insert(account.username.clone());
        if joined {
            debug!(room = %room.name, username = %account.username, "member joined");
        }
    }

    /// Snapshot of every room.
    ///
    /// Reflects some consistent state at call time; creations racing with
    /// the call may or may not appear.
    pub fn all(&self) -> HashSet<Room> {
        self.rooms.iter().map(|entry| entry.value().clone()).collect()
    }

    /// Snapshot of every room `account` is a member of.
    ///
    /// Scans the membership relation. Matching names are collected first so
    /// no membership guard is held while the rooms map is read.
    pub fn rooms_of(&self, account: &Account) -> HashSet<Room> {
        let names: Vec<String> = self
            .members
            .iter()
            .filter(|entry| entry.value().read().contains(&account.username))
            .map(|entry| entry.key().clone())
            .collect();

        names.into_iter().filter_map(|name| self.get(&name)).collect()
    }

    /// Snapshot of the usernames currently in `room`.
    pub fn members(&self, room: &Room) -> HashSet<String> {
        self.members
            .get(&room.name)
            .map(|set| set.read().clone())
            .unwrap_or_default()
    }

    /// Number of rooms.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Whether no rooms exist.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(username: &str) -> Account {
        Account {
            username: username.to_string(),
            password: "secret".to_string(),
        }
    }

    #[test]
    fn create_enrolls_creator_as_first_member() {
        let registry = RoomRegistry::new();
        let alice = account("alice");

        let room = registry
            .create(&alice, "general", Some("the lobby".to_string()))
            .expect("should create");

        assert!(registry.exists("general"));
        assert!(registry.all().contains(&room));
        assert!(registry.rooms_of(&alice).contains(&room));
        assert_eq!(
            registry.members(&room),
            HashSet::from(["alice".to_string()])
        );
    }

    #[test]
    fn duplicate_create_rejected_without_side_effects() {
        let registry = RoomRegistry::new();
        let alice = account("alice");
        let bob = account("bob");

        let room = registry
            .create(&alice, "general", Some("the lobby".to_string()))
            .expect("should create");
        let err = registry
            .create(&bob, "general", Some("bob's takeover".to_string()))
            .expect_err("duplicate should fail");
        assert_eq!(err, RegistryError::RoomExists("general".to_string()));

        // Neither the room nor its membership changed.
        assert_eq!(registry.get("general").expect("room"), room);
        assert_eq!(
            registry.members(&room),
            HashSet::from(["alice".to_string()])
        );
        assert!(registry.rooms_of(&bob).is_empty());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn join_is_idempotent() {
        let registry = RoomRegistry::new();
        let alice = account("alice");
        let bob = account("bob");

        let room = registry.create(&alice, "general", None).expect("should create");
        registry.join(&bob, &room);
        let after_first = registry.members(&room);
        registry.join(&bob, &room);
        let after_second = registry.members(&room);

        assert_eq!(after_first, after_second);
        assert_eq!(after_first.len(), 2);
    }

    #[test]
    fn rooms_of_lists_only_memberships() {
        let registry = RoomRegistry::new();
        let alice = account("alice");
        let bob = account("bob");

        let general = registry.create(&alice, "general", None).expect("create");
        let random = registry.create(&bob, "random", None).expect("create");
        registry.join(&alice, &random);

        assert_eq!(
            registry.rooms_of(&alice),
            HashSet::from([general.clone(), random.clone()])
        );
        assert_eq!(registry.rooms_of(&bob), HashSet::from([random]));
        assert!(!registry.rooms_of(&bob).contains(&general));
    }

    #[test]
    fn get_and_exists_on_unknown_name() {
        let registry = RoomRegistry::new();
        assert!(!registry.exists("nowhere"));
        assert!(registry.get("nowhere").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn all_reflects_every_room() {
        let registry = RoomRegistry::new();
        let alice = account("alice");
        for i in 0..5 {
            registry
                .create(&alice, &format!("room-{i}"), None)
                .expect("should create");
        }
        assert_eq!(registry.all().len(), 5);
        assert_eq!(registry.len(), 5);
    }
}
