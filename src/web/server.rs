//! Web server for roomhub.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use crate::chat::RouterHub;
use crate::config::Config;
use crate::{Result, RoomHubError};

use super::router::create_router;

/// Web server exposing the chat hub over WebSocket.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Chat hub.
    hub: Arc<RouterHub>,
    /// Router with all routes and layers.
    router: Router,
}

impl WebServer {
    /// Create a new web server with a fresh hub.
    pub fn new(config: &Config) -> Result<Self> {
        let hub = Arc::new(RouterHub::new(&config.chat));
        Self::with_hub(config, hub)
    }

    /// Create a new web server around an existing hub.
    pub fn with_hub(config: &Config, hub: Arc<RouterHub>) -> Result<Self> {
        let addr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|e| RoomHubError::Config(format!("invalid server address: {e}")))?;
        let router = create_router(Arc::clone(&hub), &config.server, &config.chat);

        Ok(Self { addr, hub, router })
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Get the chat hub.
    pub fn hub(&self) -> Arc<RouterHub> {
        Arc::clone(&self.hub)
    }

    /// Run the web server until it fails.
    pub async fn run(self) -> Result<()> {
        let listener = TcpListener::bind(self.addr).await?;
        tracing::info!("Chat server listening on ws://{}/chat", listener.local_addr()?);

        axum::serve(listener, self.router).await?;
        Ok(())
    }

    /// Run the server in the background and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> Result<SocketAddr> {
        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!("Chat server listening on ws://{}/chat", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, self.router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}
