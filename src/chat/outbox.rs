//! Per-connection outbound event queues.

use std::collections::HashMap;

use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, warn};

use super::protocol::ServerEvent;
use super::registry::ConnectionId;
use crate::{Result, RoomHubError};

/// Receiving end of a connection's event queue.
pub type EventStream = mpsc::Receiver<ServerEvent>;

/// Bounded event queues of attached connections.
///
/// Pushes never wait: when a recipient's queue is full or its receiver is
/// gone, the event is dropped for that recipient only.
#[derive(Debug)]
pub struct Outbox {
    queues: HashMap<ConnectionId, mpsc::Sender<ServerEvent>>,
    capacity: usize,
}

impl Outbox {
    /// Create an outbox whose queues hold `capacity` events each.
    pub fn new(capacity: usize) -> Self {
        Self {
            queues: HashMap::new(),
            capacity: capacity.max(1),
        }
    }

    /// Attach a connection and return its event stream.
    pub fn attach(&mut self, id: &ConnectionId) -> Result<EventStream> {
        if self.queues.contains_key(id) {
            return Err(RoomHubError::Transport(format!(
                "connection {id} is already attached"
            )));
        }
        let (sender, receiver) = mpsc::channel(self.capacity);
        self.queues.insert(id.clone(), sender);
        Ok(receiver)
    }

    /// Detach a connection. Returns false if it was not attached.
    pub fn detach(&mut self, id: &ConnectionId) -> bool {
        self.queues.remove(id).is_some()
    }

    /// Check whether a connection is attached.
    pub fn is_attached(&self, id: &ConnectionId) -> bool {
        self.queues.contains_key(id)
    }

    /// Number of attached connections.
    pub fn len(&self) -> usize {
        self.queues.len()
    }

    /// Whether no connection is attached.
    pub fn is_empty(&self) -> bool {
        self.queues.is_empty()
    }

    /// Push an event to one connection.
    ///
    /// Returns true if the event was queued.
    pub fn push(&self, id: &ConnectionId, event: ServerEvent) -> bool {
        let Some(queue) = self.queues.get(id) else {
            debug!(connection = %id, event = event.name(), "Dropping event for detached connection");
            return false;
        };

        match queue.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                warn!(connection = %id, event = event.name(), "Outbound queue full, dropping event");
                false
            }
            Err(TrySendError::Closed(event)) => {
                debug!(connection = %id, event = event.name(), "Outbound queue closed, dropping event");
                false
            }
        }
    }

    /// Push an event to every connection in `ids`.
    ///
    /// Returns the number of recipients the event was queued for.
    pub fn push_all<'a>(
        &self,
        ids: impl IntoIterator<Item = &'a ConnectionId>,
        event: &ServerEvent,
    ) -> usize {
        ids.into_iter()
            .filter(|id| self.push(id, event.clone()))
            .count()
    }
}
