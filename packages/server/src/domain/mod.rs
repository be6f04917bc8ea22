//! Domain layer for the chat server.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod analyzer;
pub mod entity;
pub mod error;
pub mod factory;
pub mod heuristic;
pub mod repository;
pub mod value_object;

pub use analyzer::SentimentAnalyzer;
#[cfg(test)]
pub use analyzer::MockSentimentAnalyzer;
pub use entity::{Analysis, Message, Sentiment};
pub use error::ValueObjectError;
pub use factory::ConnectionIdFactory;
pub use heuristic::HeuristicAnalyzer;
pub use repository::{Departure, MessageRepository, PresenceRepository};
pub use value_object::{ConnectionId, MessageId, MessageText, Timestamp, UserId};
