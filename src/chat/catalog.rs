//! Catalog of existing chat rooms.

use std::collections::HashSet;

use super::error::CommandError;
use super::membership::MembershipTable;
use super::registry::ConnectionId;

/// Set of room names, listed in creation order.
#[derive(Debug, Default)]
pub struct RoomCatalog {
    /// Room names in creation order.
    order: Vec<String>,
    /// Room names for constant-time existence checks.
    index: HashSet<String>,
    /// Room that `delete` refuses to remove.
    protected: Option<String>,
}

impl RoomCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog holding one seeded room.
    pub fn with_seed(name: impl Into<String>) -> Self {
        let mut catalog = Self::new();
        // Cannot collide in an empty catalog.
        let _ = catalog.create(name);
        catalog
    }

    /// Make `name` non-deletable.
    pub fn with_protected_room(mut self, name: impl Into<String>) -> Self {
        self.protected = Some(name.into());
        self
    }

    /// List room names in creation order.
    pub fn list(&self) -> Vec<String> {
        self.order.clone()
    }

    /// Check whether a room exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains(name)
    }

    /// Number of rooms.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the catalog holds no rooms.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Create a room.
    pub fn create(&mut self, name: impl Into<String>) -> Result<(), CommandError> {
        let name = name.into();
        if self.index.contains(&name) {
            return Err(CommandError::RoomExists(name));
        }
        self.index.insert(name.clone());
        self.order.push(name);
        Ok(())
    }

    /// Delete a room and every membership referencing it.
    ///
    /// Returns the connections whose membership was removed.
    pub fn delete(
        &mut self,
        name: &str,
        memberships: &mut MembershipTable,
    ) -> Result<Vec<ConnectionId>, CommandError> {
        if self.protected.as_deref() == Some(name) {
            return Err(CommandError::ProtectedRoom(name.to_string()));
        }
        if !self.index.remove(name) {
            return Err(CommandError::RoomNotFound(name.to_string()));
        }
        self.order.retain(|room| room != name);
        Ok(memberships.remove_room(name))
    }
}
