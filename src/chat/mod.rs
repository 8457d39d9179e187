//! Chat module for roomhub.
//!
//! This module provides the chat core:
//! - Display names, unique across live connections
//! - A catalog of rooms seeded with one default room
//! - Single-room membership with cascade on room deletion
//! - Command routing with replies to the caller and broadcasts to rooms

mod catalog;
mod error;
mod hub;
mod membership;
mod outbox;
mod protocol;
mod registry;

pub use catalog::RoomCatalog;
pub use error::{CommandError, ErrorKind};
pub use hub::{HubStats, RouterHub};
pub use membership::MembershipTable;
pub use outbox::{EventStream, Outbox};
pub use protocol::{ClientCommand, ServerEvent, SERVER_SENDER};
pub use registry::{ConnectionId, ConnectionRegistry};
