//! Route table of the chat server.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{
    handler::{
        get_messages, get_online_users, get_stats, health_check, send_message, websocket_handler,
    },
    state::AppState,
};

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/message", post(send_message))
        .route("/messages", get(get_messages))
        .route("/stats", get(get_stats))
        .route("/users", get(get_online_users))
        .route("/ws", get(websocket_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
