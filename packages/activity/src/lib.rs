//! Kibun activity tracker.
//!
//! A small HTTP service that records arbitrary user actions in memory and
//! answers per-user history and summary queries.

pub mod config;
pub mod domain;
pub mod error;
pub mod store;
pub mod ui;

// Re-export entry points
pub use config::ActivityConfig;
pub use ui::{build_router, run as run_activity_server};
