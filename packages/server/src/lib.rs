//! Kibun chat server library.
//!
//! Accepts chat messages over HTTP, fans them out to WebSocket observers and
//! enriches each one with a sentiment analysis after a short delay.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::ServerConfig;
pub use ui::{AppState, build_router, run as run_server};
