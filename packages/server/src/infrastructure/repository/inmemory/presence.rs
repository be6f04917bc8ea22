//! InMemory Presence Repository 実装
//!
//! 同じ userId で複数の接続（複数タブ）がある場合は参照カウントとして扱い、
//! 最後の接続が抜けたときにだけオフラインになります。

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, Departure, PresenceRepository, UserId};

#[derive(Default)]
struct Registry {
    /// userId -> そのユーザーの接続一覧
    sessions: HashMap<UserId, HashSet<ConnectionId>>,
    /// 接続 -> userId（leave 時の逆引き用）
    owners: HashMap<ConnectionId, UserId>,
}

/// インメモリ Presence Repository 実装
#[derive(Default)]
pub struct InMemoryPresenceRepository {
    registry: Mutex<Registry>,
}

impl InMemoryPresenceRepository {
    /// 空の InMemoryPresenceRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PresenceRepository for InMemoryPresenceRepository {
    async fn join(&self, user_id: UserId, connection: ConnectionId) -> bool {
        let mut registry = self.registry.lock().await;
        registry.owners.insert(connection, user_id.clone());

        let sessions = registry.sessions.entry(user_id).or_default();
        let came_online = sessions.is_empty();
        sessions.insert(connection);
        came_online
    }

    async fn leave(&self, connection: ConnectionId) -> Option<Departure> {
        let mut registry = self.registry.lock().await;
        let user_id = registry.owners.remove(&connection)?;

        let went_offline = match registry.sessions.get_mut(&user_id) {
            Some(sessions) => {
                sessions.remove(&connection);
                sessions.is_empty()
            }
            None => true,
        };
        if went_offline {
            registry.sessions.remove(&user_id);
        }

        Some(Departure {
            user_id,
            went_offline,
        })
    }

    async fn user_of(&self, connection: ConnectionId) -> Option<UserId> {
        let registry = self.registry.lock().await;
        registry.owners.get(&connection).cloned()
    }

    async fn count(&self) -> usize {
        let registry = self.registry.lock().await;
        registry.sessions.len()
    }

    async fn online_users(&self) -> Vec<UserId> {
        let registry = self.registry.lock().await;
        let mut users: Vec<UserId> = registry.sessions.keys().cloned().collect();
        users.sort();
        users
    }
}
