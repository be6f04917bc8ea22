//! UseCase: 参加者の参加（presence-join）処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinPresenceUseCase::execute() メソッド
//! - プレゼンスへの登録、`presence-joined` / `presence-count` の配信
//!
//! ### どのような状況を想定しているか
//! - 正常系：新しいユーザーの参加
//! - エッジケース：同じユーザーの2つ目の接続（人数は増えない）
//! - エッジケース：同じ接続が別の userId で参加し直す

use std::sync::Arc;

use crate::{
    domain::{ConnectionId, PresenceRepository, Timestamp, UserId},
    infrastructure::{broadcast::BroadcastHub, dto::websocket::ServerEvent},
};

use super::leave_presence::announce_departure;

/// 参加者参加のユースケース
pub struct JoinPresenceUseCase {
    presence: Arc<dyn PresenceRepository>,
    hub: Arc<BroadcastHub>,
}

impl JoinPresenceUseCase {
    pub fn new(presence: Arc<dyn PresenceRepository>, hub: Arc<BroadcastHub>) -> Self {
        Self { presence, hub }
    }

    /// 参加を実行
    ///
    /// # Returns
    ///
    /// ユーザーが新たにオンラインになった場合は `true`
    pub async fn execute(&self, connection: ConnectionId, user_id: UserId) -> bool {
        let hub = self.hub.lock().await;

        // 1. 同じ接続が別の userId で参加済みなら、先に退出させる
        match self.presence.user_of(connection).await {
            Some(current) if current == user_id => {
                hub.publish(&ServerEvent::PresenceCount {
                    count: self.presence.count().await,
                });
                return false;
            }
            Some(_) => {
                if let Some(departure) = self.presence.leave(connection).await {
                    announce_departure(&hub, self.presence.as_ref(), connection, &departure).await;
                }
            }
            None => {}
        }

        // 2. 登録し、初めての接続なら他の購読者に知らせる
        let came_online = self.presence.join(user_id.clone(), connection).await;
        if came_online {
            hub.publish_except(
                connection,
                &ServerEvent::PresenceJoined {
                    user_id: user_id.as_str().to_string(),
                    timestamp: Timestamp::now().to_rfc3339(),
                },
            );
            tracing::info!("User '{}' came online", user_id);
        }

        // 3. 人数は全員に送る
        hub.publish(&ServerEvent::PresenceCount {
            count: self.presence.count().await,
        });
        came_online
    }
}
