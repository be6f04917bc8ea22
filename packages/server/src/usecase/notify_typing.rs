//! UseCase: 入力中状態の通知

use std::sync::Arc;

use crate::{
    domain::{ConnectionId, UserId},
    infrastructure::{broadcast::BroadcastHub, dto::websocket::ServerEvent},
};

/// 入力中通知のユースケース
pub struct NotifyTypingUseCase {
    hub: Arc<BroadcastHub>,
}

impl NotifyTypingUseCase {
    pub fn new(hub: Arc<BroadcastHub>) -> Self {
        Self { hub }
    }

    /// 送信元以外の全購読者に `typing-state` を配信する
    pub async fn execute(&self, from: ConnectionId, user_id: UserId, is_typing: bool) {
        let hub = self.hub.lock().await;
        hub.publish_except(
            from,
            &ServerEvent::TypingState {
                user_id: user_id.into_string(),
                is_typing,
            },
        );
    }
}
