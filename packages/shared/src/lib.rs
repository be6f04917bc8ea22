//! Shared utilities for the Kibun chat server and activity service.

pub mod logger;
pub mod signal;
pub mod time;
