//! WebSocket transport for the chat hub.

pub mod chat;

pub use chat::{chat_ws_handler, decode_command, encode_event, socket_message_limit, ChatWsState};
