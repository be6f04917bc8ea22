//! UseCase テスト用の共通ヘルパー

use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::{
    domain::{ConnectionId, ConnectionIdFactory, Message, MessageText, UserId},
    infrastructure::{broadcast::BroadcastHub, dto::websocket::ServerEvent},
};

pub(crate) fn user(id: &str) -> UserId {
    UserId::new(id.to_string()).unwrap()
}

pub(crate) fn text(t: &str) -> MessageText {
    MessageText::new(t.to_string()).unwrap()
}

/// 購読者を1つ登録し、最初に届く履歴イベントを読み捨てる
pub(crate) async fn observe(
    hub: &BroadcastHub,
    history: &[Message],
) -> (ConnectionId, UnboundedReceiver<String>) {
    let connection = ConnectionIdFactory::generate();
    let (tx, mut rx) = mpsc::unbounded_channel();
    assert!(hub.lock().await.subscribe(connection, tx, history));
    assert!(matches!(
        recv_event(&mut rx).await,
        ServerEvent::History { .. }
    ));
    (connection, rx)
}

/// 次のイベントを待つ（1秒でタイムアウト）
pub(crate) async fn recv_event(rx: &mut UnboundedReceiver<String>) -> ServerEvent {
    let json = tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("timed out waiting for event")
        .expect("channel closed");
    serde_json::from_str(&json).unwrap()
}

/// 既に届いているイベントを全て取り出す
pub(crate) fn drain_events(rx: &mut UnboundedReceiver<String>) -> Vec<ServerEvent> {
    let mut events = Vec::new();
    while let Ok(json) = rx.try_recv() {
        events.push(serde_json::from_str(&json).unwrap());
    }
    events
}
