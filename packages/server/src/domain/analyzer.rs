//! Sentiment analyzer abstraction.

use async_trait::async_trait;

use super::entity::Analysis;

/// Classifies a message text into sentiment, mood and emotions.
///
/// Implementations never fail: a provider that cannot produce a usable
/// result answers with the deterministic heuristic instead.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SentimentAnalyzer: Send + Sync {
    async fn analyze(&self, text: &str) -> Analysis;
}
