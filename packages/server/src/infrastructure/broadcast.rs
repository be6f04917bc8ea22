//! Broadcast hub fanning server events out to connected observers.
//!
//! Each WebSocket connection registers an unbounded mpsc sender; the hub
//! serializes an event once and pushes the JSON text to every sender.
//!
//! Callers hold the hub lock across "mutate store, then publish" and across
//! "snapshot store, then subscribe". That makes the history a new observer
//! receives consistent with the live events that follow it, and gives every
//! observer the events in hub publish order.

use std::collections::HashMap;

use tokio::sync::{Mutex, MutexGuard, mpsc::UnboundedSender};

use crate::{
    domain::{ConnectionId, Message},
    infrastructure::dto::websocket::ServerEvent,
};

/// Publish/subscribe hub for [`ServerEvent`]s.
#[derive(Default)]
pub struct BroadcastHub {
    observers: Mutex<HashMap<ConnectionId, UnboundedSender<String>>>,
}

impl BroadcastHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire exclusive access to the observer set.
    pub async fn lock(&self) -> HubGuard<'_> {
        HubGuard {
            observers: self.observers.lock().await,
        }
    }
}

/// Exclusive handle on the hub; events published through one guard are
/// seen by every observer in the same order.
pub struct HubGuard<'a> {
    observers: MutexGuard<'a, HashMap<ConnectionId, UnboundedSender<String>>>,
}

impl HubGuard<'_> {
    /// Register an observer and send it `history` before anything else.
    ///
    /// Returns `false` (and registers nothing) if the observer is already gone.
    pub fn subscribe(
        &mut self,
        connection: ConnectionId,
        sender: UnboundedSender<String>,
        history: &[Message],
    ) -> bool {
        let Some(json) = encode(&ServerEvent::history(history)) else {
            return false;
        };
        if sender.send(json).is_err() {
            tracing::warn!("Observer '{}' closed before receiving history", connection);
            return false;
        }
        self.observers.insert(connection, sender);
        tracing::debug!(
            "Observer '{}' subscribed with {} messages of history",
            connection,
            history.len()
        );
        true
    }

    pub fn unsubscribe(&mut self, connection: ConnectionId) {
        if self.observers.remove(&connection).is_some() {
            tracing::debug!("Observer '{}' unsubscribed", connection);
        }
    }

    /// Send `event` to every observer.
    pub fn publish(&self, event: &ServerEvent) {
        self.deliver(event, None);
    }

    /// Send `event` to every observer except `excluded`.
    pub fn publish_except(&self, excluded: ConnectionId, event: &ServerEvent) {
        self.deliver(event, Some(excluded));
    }

    /// Send `event` to a single observer.
    pub fn send_to(&self, connection: ConnectionId, event: &ServerEvent) {
        let Some(sender) = self.observers.get(&connection) else {
            return;
        };
        if let Some(json) = encode(event)
            && sender.send(json).is_err()
        {
            tracing::warn!("Failed to send {} to observer '{}'", event.kind(), connection);
        }
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn deliver(&self, event: &ServerEvent, excluded: Option<ConnectionId>) {
        let Some(json) = encode(event) else {
            return;
        };
        let mut delivered = 0usize;
        for (connection, sender) in self.observers.iter() {
            if Some(*connection) == excluded {
                continue;
            }
            if sender.send(json.clone()).is_err() {
                tracing::warn!("Failed to send {} to observer '{}'", event.kind(), connection);
            } else {
                delivered += 1;
            }
        }
        tracing::debug!("Broadcasted {} to {} observers", event.kind(), delivered);
    }
}

fn encode(event: &ServerEvent) -> Option<String> {
    match serde_json::to_string(event) {
        Ok(json) => Some(json),
        Err(e) => {
            tracing::error!("Failed to serialize {}: {}", event.kind(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConnectionIdFactory, MessageId, MessageText, Timestamp, UserId};
    use tokio::sync::mpsc;

    fn message(id: u64) -> Message {
        Message::new(
            MessageId::new(id),
            UserId::new("alice".to_string()).unwrap(),
            MessageText::new(format!("message {id}")).unwrap(),
            Timestamp::new(0),
        )
    }

    fn parse(json: &str) -> ServerEvent {
        serde_json::from_str(json).unwrap()
    }

    #[tokio::test]
    async fn test_subscribe_sends_history_first() {
        // テスト項目: 購読直後、最初に届くイベントは履歴である
        // given (前提条件):
        let hub = BroadcastHub::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let connection = ConnectionIdFactory::generate();

        // when (操作):
        {
            let mut guard = hub.lock().await;
            assert!(guard.subscribe(connection, tx, &[message(1), message(2)]));
            guard.publish(&ServerEvent::PresenceCount { count: 1 });
        }

        // then (期待する結果):
        match parse(&rx.recv().await.unwrap()) {
            ServerEvent::History { messages } => {
                assert_eq!(messages.len(), 2);
                assert_eq!(messages[0].id, 1);
            }
            other => panic!("expected history, got {other:?}"),
        }
        assert_eq!(
            parse(&rx.recv().await.unwrap()),
            ServerEvent::PresenceCount { count: 1 }
        );
    }

    #[tokio::test]
    async fn test_publish_except_skips_excluded() {
        // テスト項目: publish_except は除外した接続以外の全員に届く
        // given (前提条件):
        let hub = BroadcastHub::new();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        let c1 = ConnectionIdFactory::generate();
        let c2 = ConnectionIdFactory::generate();
        let mut guard = hub.lock().await;
        guard.subscribe(c1, tx1, &[]);
        guard.subscribe(c2, tx2, &[]);
        rx1.recv().await.unwrap();
        rx2.recv().await.unwrap();

        // when (操作):
        let event = ServerEvent::TypingState {
            user_id: "alice".to_string(),
            is_typing: true,
        };
        guard.publish_except(c1, &event);

        // then (期待する結果):
        assert_eq!(parse(&rx2.recv().await.unwrap()), event);
        assert!(rx1.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_publish_tolerates_closed_observer() {
        // テスト項目: 切断済みの受信側があっても他の購読者には配信される
        // given (前提条件):
        let hub = BroadcastHub::new();
        let (tx1, rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        let mut guard = hub.lock().await;
        guard.subscribe(ConnectionIdFactory::generate(), tx1, &[]);
        guard.subscribe(ConnectionIdFactory::generate(), tx2, &[]);
        drop(rx1);
        rx2.recv().await.unwrap();

        // when (操作):
        guard.publish(&ServerEvent::PresenceCount { count: 2 });

        // then (期待する結果):
        assert_eq!(
            parse(&rx2.recv().await.unwrap()),
            ServerEvent::PresenceCount { count: 2 }
        );
    }

    #[tokio::test]
    async fn test_subscribe_closed_receiver_is_rejected() {
        // テスト項目: 既に閉じた受信側は登録されない
        let hub = BroadcastHub::new();
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);

        let mut guard = hub.lock().await;
        assert!(!guard.subscribe(ConnectionIdFactory::generate(), tx, &[]));
        assert_eq!(guard.observer_count(), 0);
    }

    #[tokio::test]
    async fn test_unsubscribe_and_send_to() {
        // テスト項目: send_to は指定した接続だけに届き、購読解除後は届かない
        // given (前提条件):
        let hub = BroadcastHub::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let connection = ConnectionIdFactory::generate();
        let mut guard = hub.lock().await;
        guard.subscribe(connection, tx, &[]);
        rx.recv().await.unwrap();

        // when (操作):
        let event = ServerEvent::Error {
            message: "bad frame".to_string(),
        };
        guard.send_to(connection, &event);
        guard.unsubscribe(connection);
        guard.send_to(connection, &event);

        // then (期待する結果):
        assert_eq!(parse(&rx.recv().await.unwrap()), event);
        assert_eq!(guard.observer_count(), 0);
        // sender が drop されたのでチャンネルは閉じている
        assert!(rx.recv().await.is_none());
    }
}
