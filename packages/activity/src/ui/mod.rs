//! HTTP endpoints of the activity service.

mod dto;
mod handler;
mod router;
mod runner;

pub use router::build_router;
pub use runner::run;
