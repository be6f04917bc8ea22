//! Repository traits.
//!
//! The domain layer owns these abstractions; `infrastructure::repository`
//! provides the in-memory implementations (dependency inversion).

use async_trait::async_trait;

use super::{
    entity::{Analysis, Message},
    value_object::{ConnectionId, MessageId, MessageText, Timestamp, UserId},
};

/// Append-only message log, mutable in place for enrichment.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Store a new pending message under the next id and return it.
    async fn append(&self, user_id: UserId, text: MessageText, timestamp: Timestamp) -> Message;

    /// Apply `analysis` to the message with `id`.
    ///
    /// Returns `false` if no such message exists.
    async fn merge(&self, id: MessageId, analysis: Analysis) -> bool;

    /// Every message in insertion order.
    async fn all(&self) -> Vec<Message>;

    async fn find(&self, id: MessageId) -> Option<Message>;
}

/// A connection that left the presence registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    pub user_id: UserId,
    /// `true` when this was the user's last connection
    pub went_offline: bool,
}

/// Registry of online users and the connections they joined from.
#[async_trait]
pub trait PresenceRepository: Send + Sync {
    /// Register `connection` under `user_id`.
    ///
    /// Returns `true` when the user just came online. A connection already
    /// joined under another id must be detached with [`leave`](Self::leave) first.
    async fn join(&self, user_id: UserId, connection: ConnectionId) -> bool;

    /// Remove `connection`. `None` if it never joined.
    async fn leave(&self, connection: ConnectionId) -> Option<Departure>;

    /// User id `connection` joined under, if any.
    async fn user_of(&self, connection: ConnectionId) -> Option<UserId>;

    /// Number of distinct online users.
    async fn count(&self) -> usize;

    /// Online users, sorted.
    async fn online_users(&self) -> Vec<UserId>;
}
