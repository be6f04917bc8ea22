//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層と配信ハブを操作します。

pub mod connect_observer;
pub mod enrich_message;
pub mod get_stats;
pub mod join_presence;
pub mod leave_presence;
pub mod notify_typing;
pub mod scheduler;
pub mod send_message;

#[cfg(test)]
pub(crate) mod test_support;

pub use connect_observer::ConnectObserverUseCase;
pub use enrich_message::EnrichMessageUseCase;
pub use get_stats::GetStatsUseCase;
pub use join_presence::JoinPresenceUseCase;
pub use leave_presence::LeavePresenceUseCase;
pub use notify_typing::NotifyTypingUseCase;
pub use scheduler::{DelayWindow, EnrichmentScheduler, InvalidDelayWindow};
pub use send_message::SendMessageUseCase;
