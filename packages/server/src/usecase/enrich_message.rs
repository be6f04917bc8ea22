//! UseCase: メッセージの感情分析（エンリッチメント）
//!
//! スケジューラから遅延実行されるタスク本体です。
//! 分析 → Repository へ merge → `message-updated` の配信、の順に処理します。
//!
//! ### どのような状況を想定しているか
//! - 正常系：分析結果が保存され、全購読者に配信される
//! - 異常系：対象メッセージが存在しない（結果は破棄し、配信しない）

use std::sync::Arc;

use crate::{
    domain::{MessageId, MessageRepository, MessageText, SentimentAnalyzer},
    infrastructure::{broadcast::BroadcastHub, dto::websocket::ServerEvent},
};

/// メッセージ感情分析のユースケース
pub struct EnrichMessageUseCase {
    repository: Arc<dyn MessageRepository>,
    analyzer: Arc<dyn SentimentAnalyzer>,
    hub: Arc<BroadcastHub>,
}

impl EnrichMessageUseCase {
    pub fn new(
        repository: Arc<dyn MessageRepository>,
        analyzer: Arc<dyn SentimentAnalyzer>,
        hub: Arc<BroadcastHub>,
    ) -> Self {
        Self {
            repository,
            analyzer,
            hub,
        }
    }

    /// 分析を実行し、結果を保存・配信する
    ///
    /// # Returns
    ///
    /// 結果が保存された場合は `true`、対象メッセージが無く破棄した場合は `false`
    pub async fn execute(&self, id: MessageId, text: &MessageText) -> bool {
        // 1. 分析（失敗時もフォールバック結果が返るため、ここでエラーは発生しない）
        let analysis = self.analyzer.analyze(text.as_str()).await;
        tracing::debug!(
            "Message {} classified as {} / {}",
            id,
            analysis.sentiment,
            analysis.mood
        );

        // 2. ハブをロックしたまま merge と配信を行い、履歴送信との順序を保つ
        let hub = self.hub.lock().await;
        if !self.repository.merge(id, analysis).await {
            tracing::warn!("Message {} not found, discarding analysis", id);
            return false;
        }

        match self.repository.find(id).await {
            Some(message) => {
                if let Some(event) = ServerEvent::message_updated(&message) {
                    hub.publish(&event);
                }
                true
            }
            None => {
                tracing::warn!("Message {} disappeared after merge", id);
                false
            }
        }
    }
}
