//! Axum handlers, one module per transport.

pub mod http;
pub mod websocket;

pub use http::{get_messages, get_online_users, get_stats, health_check, send_message};
pub use websocket::websocket_handler;
