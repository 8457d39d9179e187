//! roomhub - real-time chat rooms
//!
//! Connections pick a unique display name, create, list and delete rooms,
//! join one room at a time and exchange messages with its members.

pub mod chat;
pub mod config;
pub mod error;
pub mod logging;
pub mod web;

pub use chat::{ClientCommand, CommandError, ConnectionId, RouterHub, ServerEvent};
pub use config::Config;
pub use error::{Result, RoomHubError};
pub use web::WebServer;
