//! Inbound commands and outbound events.
//!
//! Both are serialized as JSON objects tagged by `type`, with the tag
//! carrying the command or event name verbatim:
//! `{"type":"JoinRoom","room":"Dev"}`, `{"type":"JoinRoomSuc"}`.

use serde::{Deserialize, Serialize};

/// Sender label used for join and leave notices.
pub const SERVER_SENDER: &str = "[Server]";

/// A command issued by a connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientCommand {
    /// Choose a display name.
    SetName {
        /// Requested display name.
        name: String,
    },
    /// Request the room list.
    GetRooms,
    /// Create a room.
    CreateRoom {
        /// Name of the new room.
        room: String,
    },
    /// Join a room.
    JoinRoom {
        /// Room to join.
        room: String,
    },
    /// Leave the current room.
    LeaveRoom,
    /// Delete a room.
    DeleteRoom {
        /// Room to delete.
        room: String,
    },
    /// Send a message to the current room.
    SendMessage {
        /// Message text.
        text: String,
    },
}

impl ClientCommand {
    /// Get the command name as it appears on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            ClientCommand::SetName { .. } => "SetName",
            ClientCommand::GetRooms => "GetRooms",
            ClientCommand::CreateRoom { .. } => "CreateRoom",
            ClientCommand::JoinRoom { .. } => "JoinRoom",
            ClientCommand::LeaveRoom => "LeaveRoom",
            ClientCommand::DeleteRoom { .. } => "DeleteRoom",
            ClientCommand::SendMessage { .. } => "SendMessage",
        }
    }
}

/// An event pushed to a connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerEvent {
    NameSetSuc,
    NameSetFail,
    RoomsUpdate {
        /// Room names in creation order.
        rooms: Vec<String>,
    },
    CreateRoomSuc,
    CreateRoomFail,
    JoinRoomSuc,
    JoinRoomFail,
    LeaveRoomSuc,
    DeleteRoomSuc,
    DeleteRoomFail,
    SendMessageSuc,
    SendMessageFail,
    /// A message delivered to every member of a room.
    ReceiveMessage {
        /// Display name of the sender, or [`SERVER_SENDER`].
        sender: String,
        /// Message text.
        text: String,
    },
}

impl ServerEvent {
    /// Create a room message from `sender`.
    pub fn message(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self::ReceiveMessage {
            sender: sender.into(),
            text: text.into(),
        }
    }

    /// Create the notice broadcast when `name` joins a room.
    pub fn joined(name: &str) -> Self {
        Self::message(SERVER_SENDER, format!("{name} has joined the room."))
    }

    /// Create the notice broadcast when `name` leaves a room.
    pub fn left(name: &str) -> Self {
        Self::message(SERVER_SENDER, format!("{name} has left the room."))
    }

    /// Get the event name as it appears on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::NameSetSuc => "NameSetSuc",
            ServerEvent::NameSetFail => "NameSetFail",
            ServerEvent::RoomsUpdate { .. } => "RoomsUpdate",
            ServerEvent::CreateRoomSuc => "CreateRoomSuc",
            ServerEvent::CreateRoomFail => "CreateRoomFail",
            ServerEvent::JoinRoomSuc => "JoinRoomSuc",
            ServerEvent::JoinRoomFail => "JoinRoomFail",
            ServerEvent::LeaveRoomSuc => "LeaveRoomSuc",
            ServerEvent::DeleteRoomSuc => "DeleteRoomSuc",
            ServerEvent::DeleteRoomFail => "DeleteRoomFail",
            ServerEvent::SendMessageSuc => "SendMessageSuc",
            ServerEvent::SendMessageFail => "SendMessageFail",
            ServerEvent::ReceiveMessage { .. } => "ReceiveMessage",
        }
    }
}
