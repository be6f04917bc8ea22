//! InMemory Message Repository 実装
//!
//! Vec を追記専用ログとして使用します。削除・圧縮は行わないため、
//! プロセスが動いている間は単調に増え続けます。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    Analysis, Message, MessageId, MessageRepository, MessageText, Timestamp, UserId,
};

/// メッセージログ本体（ID 採番とログを同じロックで保護する）
struct MessageLog {
    next_id: MessageId,
    messages: Vec<Message>,
}

/// インメモリ Message Repository 実装
///
/// ID は 1 から始まり単調増加し、ログは ID 昇順に並ぶため、
/// merge は二分探索で対象を見つけます。
pub struct InMemoryMessageRepository {
    log: Mutex<MessageLog>,
}

impl InMemoryMessageRepository {
    /// 空の InMemoryMessageRepository を作成
    pub fn new() -> Self {
        Self {
            log: Mutex::new(MessageLog {
                next_id: MessageId::FIRST,
                messages: Vec::new(),
            }),
        }
    }
}

impl Default for InMemoryMessageRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn append(&self, user_id: UserId, text: MessageText, timestamp: Timestamp) -> Message {
        let mut log = self.log.lock().await;
        let id = log.next_id;
        log.next_id = id.next();

        let message = Message::new(id, user_id, text, timestamp);
        log.messages.push(message.clone());
        message
    }

    async fn merge(&self, id: MessageId, analysis: Analysis) -> bool {
        let mut log = self.log.lock().await;
        match log.messages.binary_search_by_key(&id, |m| m.id) {
            Ok(index) => {
                log.messages[index].apply_analysis(analysis);
                true
            }
            Err(_) => false,
        }
    }

    async fn all(&self) -> Vec<Message> {
        let log = self.log.lock().await;
        log.messages.clone()
    }

    async fn find(&self, id: MessageId) -> Option<Message> {
        let log = self.log.lock().await;
        log.messages
            .binary_search_by_key(&id, |m| m.id)
            .ok()
            .map(|index| log.messages[index].clone())
    }
}
