//! エンリッチメントのスケジューラ
//!
//! メッセージごとに1つだけ遅延タスクを起動し、ランダムな待ち時間の後に
//! [`EnrichMessageUseCase`] を実行します。リトライやキャンセルは行いません。
//! 実行中のタスクはメッセージ ID をキーに記録し、完了（panic を含む）時に取り除きます。

use std::{
    collections::HashSet,
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use rand::Rng;
use thiserror::Error;

use crate::domain::{MessageId, MessageText};

use super::enrich_message::EnrichMessageUseCase;

/// `min > max` で作ろうとした遅延幅
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("analysis delay minimum ({min:?}) exceeds maximum ({max:?})")]
pub struct InvalidDelayWindow {
    pub min: Duration,
    pub max: Duration,
}

/// 分析開始までの待ち時間の範囲（両端を含む）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayWindow {
    min: Duration,
    max: Duration,
}

impl DelayWindow {
    pub fn new(min: Duration, max: Duration) -> Result<Self, InvalidDelayWindow> {
        if min > max {
            return Err(InvalidDelayWindow { min, max });
        }
        Ok(Self { min, max })
    }

    /// 待ち時間なし（テスト用途）
    pub fn immediate() -> Self {
        Self {
            min: Duration::ZERO,
            max: Duration::ZERO,
        }
    }

    /// 範囲内から一様に待ち時間を選ぶ
    pub fn sample(&self) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        rand::thread_rng().gen_range(self.min..=self.max)
    }
}

type PendingSet = Arc<Mutex<HashSet<MessageId>>>;

/// 実行中タスクの記録。drop 時（正常終了・panic のどちらでも）に記録を消す
struct PendingEntry {
    id: MessageId,
    pending: PendingSet,
}

impl Drop for PendingEntry {
    fn drop(&mut self) {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.id);
    }
}

/// メッセージ ID ごとの遅延分析タスクを管理する
pub struct EnrichmentScheduler {
    enrich: Arc<EnrichMessageUseCase>,
    window: DelayWindow,
    pending: PendingSet,
}

impl EnrichmentScheduler {
    pub fn new(enrich: Arc<EnrichMessageUseCase>, window: DelayWindow) -> Self {
        Self {
            enrich,
            window,
            pending: Arc::default(),
        }
    }

    /// 遅延分析タスクを1つ起動する
    ///
    /// 同じ ID が既に実行中なら何もしない（1メッセージにつき1回だけ）。
    pub fn schedule(&self, id: MessageId, text: MessageText) {
        let Some(entry) = self.track(id) else {
            tracing::warn!("Analysis for message {} is already scheduled", id);
            return;
        };

        let delay = self.window.sample();
        let enrich = self.enrich.clone();
        tokio::spawn(async move {
            let _entry = entry;
            tokio::time::sleep(delay).await;
            enrich.execute(id, &text).await;
        });
        tracing::debug!("Scheduled analysis for message {} in {:?}", id, delay);
    }

    pub fn is_pending(&self, id: MessageId) -> bool {
        self.lock_pending().contains(&id)
    }

    pub fn pending_count(&self) -> usize {
        self.lock_pending().len()
    }

    fn track(&self, id: MessageId) -> Option<PendingEntry> {
        if !self.lock_pending().insert(id) {
            return None;
        }
        Some(PendingEntry {
            id,
            pending: self.pending.clone(),
        })
    }

    fn lock_pending(&self) -> std::sync::MutexGuard<'_, HashSet<MessageId>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
