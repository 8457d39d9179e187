//! Router configuration for the web transport.

use axum::{routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::chat::RouterHub;
use crate::config::{ChatConfig, ServerConfig};

use super::middleware::create_cors_layer;
use super::ws::{chat_ws_handler, ChatWsState};

/// Create the main router: the chat WebSocket endpoint plus health check.
pub fn create_router(
    hub: Arc<RouterHub>,
    server_config: &ServerConfig,
    chat_config: &ChatConfig,
) -> Router {
    let ws_state = Arc::new(ChatWsState::new(hub, chat_config.max_frame_bytes));

    let chat_routes = Router::new()
        .route("/chat", get(chat_ws_handler))
        .with_state(ws_state);

    Router::new()
        .merge(chat_routes)
        .merge(create_health_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(&server_config.cors_origins)),
        )
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
