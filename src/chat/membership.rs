//! Which room each connection is in.
//!
//! The inverse index (room to members) is what room broadcasts are
//! addressed to, so joining or leaving a room and entering or leaving its
//! broadcast group are the same mutation.

use std::collections::{HashMap, HashSet};

use super::catalog::RoomCatalog;
use super::error::CommandError;
use super::registry::ConnectionId;

/// Connection to room relation, at most one room per connection.
#[derive(Debug, Default)]
pub struct MembershipTable {
    rooms: HashMap<ConnectionId, String>,
    members: HashMap<String, HashSet<ConnectionId>>,
}

impl MembershipTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `id` into `room`.
    ///
    /// Fails if `id` is already in any room or if `room` is not in `catalog`.
    pub fn join(
        &mut self,
        id: &ConnectionId,
        room: &str,
        catalog: &RoomCatalog,
    ) -> Result<(), CommandError> {
        if let Some(current) = self.rooms.get(id) {
            return Err(CommandError::AlreadyMember(current.clone()));
        }
        if !catalog.contains(room) {
            return Err(CommandError::RoomNotFound(room.to_string()));
        }

        self.rooms.insert(id.clone(), room.to_string());
        self.members
            .entry(room.to_string())
            .or_default()
            .insert(id.clone());
        Ok(())
    }

    /// Remove `id` from its room, returning the room it was in.
    pub fn leave(&mut self, id: &ConnectionId) -> Option<String> {
        let room = self.rooms.remove(id)?;
        if let Some(members) = self.members.get_mut(&room) {
            members.remove(id);
            if members.is_empty() {
                self.members.remove(&room);
            }
        }
        Some(room)
    }

    /// Remove every membership in `room`, returning the removed connections.
    pub fn remove_room(&mut self, room: &str) -> Vec<ConnectionId> {
        let Some(members) = self.members.remove(room) else {
            return Vec::new();
        };
        for id in &members {
            self.rooms.remove(id);
        }
        members.into_iter().collect()
    }

    /// Get the room `id` is in.
    pub fn room_of(&self, id: &ConnectionId) -> Option<&str> {
        self.rooms.get(id).map(String::as_str)
    }

    /// Iterate over the current members of `room`.
    pub fn members(&self, room: &str) -> impl Iterator<Item = &ConnectionId> {
        self.members.get(room).into_iter().flatten()
    }

    /// Number of members in `room`.
    pub fn member_count(&self, room: &str) -> usize {
        self.members.get(room).map_or(0, HashSet::len)
    }

    /// Total number of memberships.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Whether no connection is in a room.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
