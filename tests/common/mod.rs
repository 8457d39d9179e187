//! Test helpers for hub and WebSocket tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use roomhub::chat::EventStream;
use roomhub::{ClientCommand, Config, ConnectionId, RouterHub, ServerEvent, WebServer};

/// Default timeout for test operations.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Collect every event currently queued on a stream.
pub fn drain(stream: &mut EventStream) -> Vec<ServerEvent> {
    let mut events = Vec::new();
    while let Ok(event) = stream.try_recv() {
        events.push(event);
    }
    events
}

/// Attach a connection to the hub.
pub async fn attach(hub: &RouterHub, id: &str) -> (ConnectionId, EventStream) {
    let id = ConnectionId::new(id);
    let stream = hub.connect(id.clone()).await.unwrap();
    (id, stream)
}

/// Attach a connection and give it a display name, discarding the reply.
pub async fn attach_named(hub: &RouterHub, id: &str, name: &str) -> (ConnectionId, EventStream) {
    let (id, mut stream) = attach(hub, id).await;
    hub.set_name(&id, name).await.unwrap();
    drain(&mut stream);
    (id, stream)
}

/// Start a server on a random local port.
pub async fn start_server() -> (SocketAddr, Arc<RouterHub>) {
    let mut config = Config::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 0;

    let server = WebServer::new(&config).unwrap();
    let hub = server.hub();
    let addr = server.run_with_addr().await.unwrap();
    (addr, hub)
}

/// WebSocket chat client speaking the JSON protocol.
pub struct TestClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    /// Connect to the chat endpoint of the server at `addr`.
    pub async fn connect(addr: SocketAddr) -> Self {
        let (stream, _) = connect_async(format!("ws://{addr}/chat")).await.unwrap();
        Self { stream }
    }

    /// Send a command.
    pub async fn send(&mut self, command: &ClientCommand) {
        let json = serde_json::to_string(command).unwrap();
        self.stream.send(Message::Text(json)).await.unwrap();
    }

    /// Send a raw text frame.
    pub async fn send_raw(&mut self, text: &str) {
        self.stream.send(Message::Text(text.to_string())).await.unwrap();
    }

    /// Receive the next event, failing after the default timeout.
    pub async fn recv(&mut self) -> ServerEvent {
        loop {
            let frame = timeout(DEFAULT_TIMEOUT, self.stream.next())
                .await
                .expect("timed out waiting for event")
                .expect("stream ended")
                .unwrap();
            if let Message::Text(text) = frame {
                return serde_json::from_str(&text).unwrap();
            }
        }
    }

    /// Receive `n` events.
    pub async fn recv_n(&mut self, n: usize) -> Vec<ServerEvent> {
        let mut events = Vec::with_capacity(n);
        for _ in 0..n {
            events.push(self.recv().await);
        }
        events
    }

    /// Assert that no event arrives within a short window.
    pub async fn expect_silence(&mut self) {
        let result = timeout(Duration::from_millis(200), self.stream.next()).await;
        assert!(result.is_err(), "unexpected frame: {:?}", result);
    }

    /// Close the connection.
    pub async fn close(mut self) {
        let _ = self.stream.close(None).await;
    }
}
