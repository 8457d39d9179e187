//! Connection identities and their display names.

use std::collections::HashMap;
use std::fmt;

use super::error::CommandError;

/// Opaque identifier of one transport session.
///
/// Assigned by the transport; the hub only compares and hashes it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// Wrap a transport-assigned identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ConnectionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ConnectionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Display names of live connections.
///
/// Indexed in both directions so that the uniqueness check and the
/// per-connection lookup are both constant time.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    names: HashMap<ConnectionId, String>,
    holders: HashMap<String, ConnectionId>,
}

impl ConnectionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `id`.
    ///
    /// Fails with [`CommandError::NameTaken`] if another connection holds the
    /// name. Re-registering the name already held is a no-op; registering a
    /// different name releases the previous one.
    pub fn register(&mut self, id: &ConnectionId, name: &str) -> Result<(), CommandError> {
        match self.holders.get(name) {
            Some(holder) if holder == id => return Ok(()),
            Some(_) => return Err(CommandError::NameTaken(name.to_string())),
            None => {}
        }

        if let Some(previous) = self.names.insert(id.clone(), name.to_string()) {
            self.holders.remove(&previous);
        }
        self.holders.insert(name.to_string(), id.clone());
        Ok(())
    }

    /// Remove the binding for `id`, returning the released name.
    pub fn unregister(&mut self, id: &ConnectionId) -> Option<String> {
        let name = self.names.remove(id)?;
        self.holders.remove(&name);
        Some(name)
    }

    /// Get the display name bound to `id`.
    pub fn name_of(&self, id: &ConnectionId) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Get the connection holding `name`.
    pub fn holder_of(&self, name: &str) -> Option<&ConnectionId> {
        self.holders.get(name)
    }

    /// Number of named connections.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no connection has a name.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
