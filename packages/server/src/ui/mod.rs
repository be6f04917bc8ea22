//! UI layer: HTTP and WebSocket endpoints of the chat server.

pub mod error;
mod handler;
mod router;
mod runner;
pub mod state;

pub use router::build_router;
pub use runner::run;
pub use state::AppState;
