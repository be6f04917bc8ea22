//! UseCase: 購読者（WebSocket 接続）の登録
//!
//! 接続直後に、その時点の全メッセージを `history` として送ってから
//! ライブ配信の対象に加えます。

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;

use crate::{
    domain::{ConnectionId, MessageRepository},
    infrastructure::broadcast::BroadcastHub,
};

/// 購読者登録のユースケース
pub struct ConnectObserverUseCase {
    repository: Arc<dyn MessageRepository>,
    hub: Arc<BroadcastHub>,
}

impl ConnectObserverUseCase {
    pub fn new(repository: Arc<dyn MessageRepository>, hub: Arc<BroadcastHub>) -> Self {
        Self { repository, hub }
    }

    /// 履歴を送信して購読者として登録する
    ///
    /// # Returns
    ///
    /// 登録できた場合は `true`（受信側が既に閉じていれば `false`）
    pub async fn execute(&self, connection: ConnectionId, sender: UnboundedSender<String>) -> bool {
        // ハブのロック中にスナップショットを取ることで、
        // 履歴に含まれるメッセージの message-created が後から届くことはない
        let mut hub = self.hub.lock().await;
        let history = self.repository.all().await;
        hub.subscribe(connection, sender, &history)
    }
}
