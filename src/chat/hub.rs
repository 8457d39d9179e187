//! Command routing for the chat hub.
//!
//! `RouterHub` owns the connection registry, the room catalog, the
//! membership table and the outbound queues behind a single lock. Each
//! command runs its checks, its mutation and the enqueueing of its events
//! in one critical section, so uniqueness and existence checks always see
//! the state they mutate.

use tokio::sync::RwLock;
use tracing::{debug, info};

use super::catalog::RoomCatalog;
use super::error::CommandError;
use super::membership::MembershipTable;
use super::outbox::{EventStream, Outbox};
use super::protocol::{ClientCommand, ServerEvent};
use super::registry::{ConnectionId, ConnectionRegistry};
use crate::config::ChatConfig;
use crate::Result;

/// Snapshot of hub occupancy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HubStats {
    /// Attached connections.
    pub connections: usize,
    /// Connections with a display name.
    pub named: usize,
    /// Existing rooms.
    pub rooms: usize,
    /// Connections that are in a room.
    pub memberships: usize,
}

/// Everything guarded by the hub lock.
#[derive(Debug)]
struct ChatState {
    registry: ConnectionRegistry,
    catalog: RoomCatalog,
    memberships: MembershipTable,
    outbox: Outbox,
}

impl ChatState {
    fn ensure_attached(&self, id: &ConnectionId) -> std::result::Result<(), CommandError> {
        if self.outbox.is_attached(id) {
            Ok(())
        } else {
            Err(CommandError::Detached)
        }
    }

    /// Push the success or failure event for `result` to the caller.
    fn reply<T>(
        &self,
        id: &ConnectionId,
        result: &std::result::Result<T, CommandError>,
        success: ServerEvent,
        failure: ServerEvent,
    ) {
        let event = if result.is_ok() { success } else { failure };
        self.outbox.push(id, event);
    }

    /// Push an event to every current member of `room`.
    fn broadcast(&self, room: &str, event: &ServerEvent) -> usize {
        self.outbox.push_all(self.memberships.members(room), event)
    }
}

/// Routes chat commands to the shared stores and emits their events.
pub struct RouterHub {
    state: RwLock<ChatState>,
}

impl RouterHub {
    /// Create a hub from configuration.
    pub fn new(config: &ChatConfig) -> Self {
        let mut catalog = RoomCatalog::with_seed(config.default_room.as_str());
        if config.protect_default_room {
            catalog = catalog.with_protected_room(config.default_room.as_str());
        }

        Self {
            state: RwLock::new(ChatState {
                registry: ConnectionRegistry::new(),
                catalog,
                memberships: MembershipTable::new(),
                outbox: Outbox::new(config.outbound_capacity),
            }),
        }
    }

    /// Create a hub with the default configuration (one "General" room).
    pub fn with_defaults() -> Self {
        Self::new(&ChatConfig::default())
    }

    /// Attach a transport session and return its event stream.
    ///
    /// Fails if a connection with the same id is already attached.
    pub async fn connect(&self, id: ConnectionId) -> Result<EventStream> {
        let mut state = self.state.write().await;
        let stream = state.outbox.attach(&id)?;
        debug!(connection = %id, "Connection attached");
        Ok(stream)
    }

    /// Tear down a connection.
    ///
    /// Releases its name, removes its membership (notifying the room it was
    /// in) and closes its event stream. Only the first call for a connection
    /// has any effect; the return value tells whether this was it.
    pub async fn disconnect(&self, id: &ConnectionId, reason: Option<&str>) -> bool {
        let mut guard = self.state.write().await;
        let state = &mut *guard;

        if !state.outbox.detach(id) {
            debug!(connection = %id, "Disconnect for a connection that is not attached");
            return false;
        }

        let name = state.registry.unregister(id);
        let room = state.memberships.leave(id);
        if let (Some(name), Some(room)) = (&name, &room) {
            state.broadcast(room, &ServerEvent::left(name));
        }

        match reason {
            Some(reason) => info!(
                connection = %id,
                name = name.as_deref().unwrap_or("-"),
                reason,
                "Connection closed with error"
            ),
            None => info!(
                connection = %id,
                name = name.as_deref().unwrap_or("-"),
                "Connection closed"
            ),
        }
        true
    }

    /// Run one inbound command for `id`.
    ///
    /// Failures have already been reported to the caller as failure events
    /// when this returns; they are only logged here.
    pub async fn dispatch(&self, id: &ConnectionId, command: ClientCommand) {
        let command_name = command.name();
        debug!(connection = %id, command = command_name, "Dispatching command");

        let result = match command {
            ClientCommand::SetName { name } => self.set_name(id, &name).await,
            ClientCommand::GetRooms => self.get_rooms(id).await.map(drop),
            ClientCommand::CreateRoom { room } => self.create_room(id, &room).await,
            ClientCommand::JoinRoom { room } => self.join_room(id, &room).await,
            ClientCommand::LeaveRoom => self.leave_room(id).await.map(drop),
            ClientCommand::DeleteRoom { room } => self.delete_room(id, &room).await,
            ClientCommand::SendMessage { text } => self.send_message(id, &text).await,
        };

        if let Err(e) = result {
            debug!(connection = %id, command = command_name, error = %e, "Command refused");
        }
    }

    /// Choose a display name. Replies `NameSetSuc` / `NameSetFail`.
    pub async fn set_name(
        &self,
        id: &ConnectionId,
        name: &str,
    ) -> std::result::Result<(), CommandError> {
        let mut state = self.state.write().await;
        state.ensure_attached(id)?;

        let result = state.registry.register(id, name);
        state.reply(id, &result, ServerEvent::NameSetSuc, ServerEvent::NameSetFail);
        result
    }

    /// List rooms. Replies `RoomsUpdate`.
    pub async fn get_rooms(
        &self,
        id: &ConnectionId,
    ) -> std::result::Result<Vec<String>, CommandError> {
        let state = self.state.read().await;
        state.ensure_attached(id)?;

        let rooms = state.catalog.list();
        state.outbox.push(
            id,
            ServerEvent::RoomsUpdate {
                rooms: rooms.clone(),
            },
        );
        Ok(rooms)
    }

    /// Create a room. Replies `CreateRoomSuc` / `CreateRoomFail`.
    pub async fn create_room(
        &self,
        id: &ConnectionId,
        room: &str,
    ) -> std::result::Result<(), CommandError> {
        let mut state = self.state.write().await;
        state.ensure_attached(id)?;

        let result = state.catalog.create(room);
        state.reply(
            id,
            &result,
            ServerEvent::CreateRoomSuc,
            ServerEvent::CreateRoomFail,
        );
        if result.is_ok() {
            info!(connection = %id, room, "Room created");
        }
        result
    }

    /// Join a room. Replies `JoinRoomSuc` / `JoinRoomFail`.
    ///
    /// Requires a display name. On success every member of the room,
    /// the joiner included, receives the join notice.
    pub async fn join_room(
        &self,
        id: &ConnectionId,
        room: &str,
    ) -> std::result::Result<(), CommandError> {
        let mut guard = self.state.write().await;
        let state = &mut *guard;
        state.ensure_attached(id)?;

        let result = match state.registry.name_of(id) {
            Some(name) => state
                .memberships
                .join(id, room, &state.catalog)
                .map(|()| name.to_string()),
            None => Err(CommandError::Unnamed),
        };
        state.reply(id, &result, ServerEvent::JoinRoomSuc, ServerEvent::JoinRoomFail);

        let name = result?;
        state.broadcast(room, &ServerEvent::joined(&name));
        Ok(())
    }

    /// Leave the current room. Always replies `LeaveRoomSuc`.
    ///
    /// Returns the room that was left. The remaining members receive the
    /// leave notice only when there was a membership.
    pub async fn leave_room(
        &self,
        id: &ConnectionId,
    ) -> std::result::Result<Option<String>, CommandError> {
        let mut guard = self.state.write().await;
        let state = &mut *guard;
        state.ensure_attached(id)?;

        let left = state.memberships.leave(id);
        state.outbox.push(id, ServerEvent::LeaveRoomSuc);

        if let Some(room) = &left {
            if let Some(name) = state.registry.name_of(id) {
                state.broadcast(room, &ServerEvent::left(name));
            }
        }
        Ok(left)
    }

    /// Delete a room and every membership in it.
    /// Replies `DeleteRoomSuc` / `DeleteRoomFail`.
    pub async fn delete_room(
        &self,
        id: &ConnectionId,
        room: &str,
    ) -> std::result::Result<(), CommandError> {
        let mut guard = self.state.write().await;
        let state = &mut *guard;
        state.ensure_attached(id)?;

        let result = state.catalog.delete(room, &mut state.memberships);
        state.reply(
            id,
            &result,
            ServerEvent::DeleteRoomSuc,
            ServerEvent::DeleteRoomFail,
        );

        let removed = result?;
        info!(
            connection = %id,
            room,
            removed_members = removed.len(),
            "Room deleted"
        );
        Ok(())
    }

    /// Send a message to the caller's room.
    /// Replies `SendMessageSuc` / `SendMessageFail`.
    ///
    /// The room, sender included, receives `ReceiveMessage` before the
    /// sender receives `SendMessageSuc`.
    pub async fn send_message(
        &self,
        id: &ConnectionId,
        text: &str,
    ) -> std::result::Result<(), CommandError> {
        let state = self.state.read().await;
        state.ensure_attached(id)?;

        let target = match (state.memberships.room_of(id), state.registry.name_of(id)) {
            (Some(room), Some(name)) => Ok((room, name)),
            (None, _) => Err(CommandError::NotAMember),
            (Some(_), None) => Err(CommandError::Unnamed),
        };

        match target {
            Ok((room, name)) => {
                let delivered = state.broadcast(room, &ServerEvent::message(name, text));
                debug!(connection = %id, room, delivered, "Message broadcast");
                state.outbox.push(id, ServerEvent::SendMessageSuc);
                Ok(())
            }
            Err(e) => {
                state.outbox.push(id, ServerEvent::SendMessageFail);
                Err(e)
            }
        }
    }

    /// Get the display name of a connection.
    pub async fn name_of(&self, id: &ConnectionId) -> Option<String> {
        self.state
            .read()
            .await
            .registry
            .name_of(id)
            .map(str::to_string)
    }

    /// Get the room a connection is in.
    pub async fn room_of(&self, id: &ConnectionId) -> Option<String> {
        self.state
            .read()
            .await
            .memberships
            .room_of(id)
            .map(str::to_string)
    }

    /// List rooms without addressing a connection.
    pub async fn rooms(&self) -> Vec<String> {
        self.state.read().await.catalog.list()
    }

    /// List the members of a room.
    pub async fn members(&self, room: &str) -> Vec<ConnectionId> {
        self.state
            .read()
            .await
            .memberships
            .members(room)
            .cloned()
            .collect()
    }

    /// Get a snapshot of hub occupancy.
    pub async fn stats(&self) -> HubStats {
        let state = self.state.read().await;
        HubStats {
            connections: state.outbox.len(),
            named: state.registry.len(),
            rooms: state.catalog.len(),
            memberships: state.memberships.len(),
        }
    }
}

impl Default for RouterHub {
    fn default() -> Self {
        Self::with_defaults()
    }
}
