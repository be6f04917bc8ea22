//! UseCase: メッセージ送信（取り込み）処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - メッセージの保存、`message-created` の即時配信、分析のスケジュール
//!
//! ### なぜこのテストが必要か
//! - 返される messageId が単調増加であることを保証
//! - 分析が終わる前に全購読者へメッセージが見えることを確認
//! - `message-created` が必ず `message-updated` より先に届くことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：メッセージ送信とブロードキャスト、遅延後の分析結果配信
//! - エッジケース：購読者がいない状態での送信

use std::sync::Arc;

use crate::{
    domain::{MessageId, MessageRepository, MessageText, Timestamp, UserId},
    infrastructure::{broadcast::BroadcastHub, dto::websocket::ServerEvent},
};

use super::scheduler::EnrichmentScheduler;

/// `user-activity` イベントで通知するアクション名
pub const SENT_MESSAGE_ACTION: &str = "sent_message";

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    repository: Arc<dyn MessageRepository>,
    hub: Arc<BroadcastHub>,
    scheduler: Arc<EnrichmentScheduler>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(
        repository: Arc<dyn MessageRepository>,
        hub: Arc<BroadcastHub>,
        scheduler: Arc<EnrichmentScheduler>,
    ) -> Self {
        Self {
            repository,
            hub,
            scheduler,
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `user_id` - 送信者のユーザー ID（Domain Model）
    /// * `text` - メッセージ本文（Domain Model）
    ///
    /// # Returns
    ///
    /// 採番されたメッセージ ID
    pub async fn execute(&self, user_id: UserId, text: MessageText) -> MessageId {
        let timestamp = Timestamp::now();

        // 1. ハブをロックしたまま保存と配信を行う（履歴送信と二重にならないように）
        let message = {
            let hub = self.hub.lock().await;
            let message = self.repository.append(user_id, text, timestamp).await;

            hub.publish(&ServerEvent::message_created(&message));
            hub.publish(&ServerEvent::UserActivity {
                user_id: message.user_id.as_str().to_string(),
                action: SENT_MESSAGE_ACTION.to_string(),
                timestamp: timestamp.to_rfc3339(),
            });
            message
        };
        tracing::info!(
            "Message {} from '{}' stored and broadcasted",
            message.id,
            message.user_id
        );

        // 2. 配信後に分析をスケジュールする（created は必ず updated より先）
        self.scheduler.schedule(message.id, message.text.clone());

        message.id
    }
}
