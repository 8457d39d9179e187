//! Web transport for roomhub.
//!
//! This module binds the chat hub to a WebSocket endpoint and provides a
//! health check.

pub mod middleware;
pub mod router;
pub mod server;
pub mod ws;

pub use router::create_router;
pub use server::WebServer;
