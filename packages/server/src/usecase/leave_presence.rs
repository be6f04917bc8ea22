//! UseCase: 参加者の退出（切断）処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LeavePresenceUseCase::execute() メソッド
//! - 購読解除、プレゼンスからの削除、`presence-left` / `presence-count` の配信
//!
//! ### どのような状況を想定しているか
//! - 正常系：最後の接続が抜けてオフラインになる
//! - エッジケース：同じユーザーの別タブが残っている
//! - 異常系：join する前に切断された接続

use std::sync::Arc;

use crate::{
    domain::{ConnectionId, Departure, PresenceRepository, Timestamp},
    infrastructure::{
        broadcast::{BroadcastHub, HubGuard},
        dto::websocket::ServerEvent,
    },
};

/// 参加者退出のユースケース
pub struct LeavePresenceUseCase {
    presence: Arc<dyn PresenceRepository>,
    hub: Arc<BroadcastHub>,
}

impl LeavePresenceUseCase {
    pub fn new(presence: Arc<dyn PresenceRepository>, hub: Arc<BroadcastHub>) -> Self {
        Self { presence, hub }
    }

    /// 接続の退出を実行
    ///
    /// # Returns
    ///
    /// join 済みの接続だった場合はその退出情報、そうでなければ `None`
    pub async fn execute(&self, connection: ConnectionId) -> Option<Departure> {
        let mut hub = self.hub.lock().await;
        hub.unsubscribe(connection);

        let departure = self.presence.leave(connection).await?;
        announce_departure(&hub, self.presence.as_ref(), connection, &departure).await;
        Some(departure)
    }
}

/// 退出を残りの購読者に知らせる
///
/// オフラインになった場合のみ `presence-left` を送り、人数は常に送る。
pub(super) async fn announce_departure(
    hub: &HubGuard<'_>,
    presence: &dyn PresenceRepository,
    connection: ConnectionId,
    departure: &Departure,
) {
    if departure.went_offline {
        hub.publish_except(
            connection,
            &ServerEvent::PresenceLeft {
                user_id: departure.user_id.as_str().to_string(),
                timestamp: Timestamp::now().to_rfc3339(),
            },
        );
        tracing::info!("User '{}' went offline", departure.user_id);
    }
    hub.publish(&ServerEvent::PresenceCount {
        count: presence.count().await,
    });
}
