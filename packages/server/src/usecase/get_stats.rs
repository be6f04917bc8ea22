//! UseCase: チャット統計の集計

use std::sync::Arc;

use crate::{
    domain::{Message, MessageRepository, PresenceRepository, Sentiment},
    infrastructure::dto::http::{SentimentBreakdownDto, StatsDto},
};

/// チャット統計のユースケース
pub struct GetStatsUseCase {
    repository: Arc<dyn MessageRepository>,
    presence: Arc<dyn PresenceRepository>,
}

impl GetStatsUseCase {
    pub fn new(
        repository: Arc<dyn MessageRepository>,
        presence: Arc<dyn PresenceRepository>,
    ) -> Self {
        Self {
            repository,
            presence,
        }
    }

    pub async fn execute(&self) -> StatsDto {
        let messages = self.repository.all().await;
        let active_users = self.presence.count().await;
        build_stats(&messages, active_users)
    }
}

fn build_stats(messages: &[Message], active_users: usize) -> StatsDto {
    let mut breakdown = SentimentBreakdownDto::default();
    for message in messages {
        match message.sentiment() {
            Some(Sentiment::Positive) => breakdown.positive += 1,
            Some(Sentiment::Negative) => breakdown.negative += 1,
            Some(Sentiment::Neutral) => breakdown.neutral += 1,
            None => breakdown.pending += 1,
        }
    }

    let total = messages.len() as u64;
    let words: u64 = messages.iter().map(|m| m.word_count as u64).sum();
    // 四捨五入（0.5 は切り上げ）
    let average_words_per_message = if total == 0 {
        0
    } else {
        (2 * words + total) / (2 * total)
    };

    StatsDto {
        total_messages: messages.len(),
        active_users,
        sentiment_breakdown: breakdown,
        average_words_per_message,
        messages_with_emoji: messages.iter().filter(|m| m.has_emoji).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ConnectionIdFactory, Timestamp, heuristic},
        infrastructure::repository::{InMemoryMessageRepository, InMemoryPresenceRepository},
        usecase::test_support::{text, user},
    };

    #[tokio::test]
    async fn test_stats_on_empty_chat() {
        // テスト項目: メッセージが無い場合は全て 0
        let usecase = GetStatsUseCase::new(
            Arc::new(InMemoryMessageRepository::new()),
            Arc::new(InMemoryPresenceRepository::new()),
        );

        let stats = usecase.execute().await;

        assert_eq!(stats.total_messages, 0);
        assert_eq!(stats.average_words_per_message, 0);
        assert_eq!(stats.sentiment_breakdown, SentimentBreakdownDto::default());
    }

    #[tokio::test]
    async fn test_stats_aggregates_messages_and_presence() {
        // テスト項目: 感情の内訳・平均単語数・絵文字付きメッセージ数・オンライン人数を集計する
        // given (前提条件):
        let repository = Arc::new(InMemoryMessageRepository::new());
        let presence = Arc::new(InMemoryPresenceRepository::new());
        let texts = ["I love this!", "this is terrible", "what time is it?", "ok 😀"];
        for t in texts {
            repository.append(user("alice"), text(t), Timestamp::new(0)).await;
        }
        // 最後の1件以外を分類済みにする
        for message in repository.all().await.iter().take(3) {
            repository
                .merge(message.id, heuristic::classify(message.text.as_str()))
                .await;
        }
        presence.join(user("alice"), ConnectionIdFactory::generate()).await;
        presence.join(user("bob"), ConnectionIdFactory::generate()).await;
        let usecase = GetStatsUseCase::new(repository, presence);

        // when (操作):
        let stats = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(stats.total_messages, 4);
        assert_eq!(stats.active_users, 2);
        assert_eq!(
            stats.sentiment_breakdown,
            SentimentBreakdownDto {
                positive: 1,
                negative: 1,
                neutral: 1,
                pending: 1
            }
        );
        // (3 + 3 + 4 + 2) / 4 = 3
        assert_eq!(stats.average_words_per_message, 3);
        assert_eq!(stats.messages_with_emoji, 1);
    }

    #[tokio::test]
    async fn test_breakdown_sums_to_total() {
        // テスト項目: 内訳の合計は常に総メッセージ数と一致する
        let repository = Arc::new(InMemoryMessageRepository::new());
        for i in 0..7 {
            let message = repository
                .append(user("bob"), text(&format!("good {i}")), Timestamp::new(0))
                .await;
            if i % 2 == 0 {
                repository
                    .merge(message.id, heuristic::classify(message.text.as_str()))
                    .await;
            }
        }
        let usecase =
            GetStatsUseCase::new(repository, Arc::new(InMemoryPresenceRepository::new()));

        let stats = usecase.execute().await;

        let b = &stats.sentiment_breakdown;
        assert_eq!(b.positive + b.negative + b.neutral + b.pending, stats.total_messages);
    }

    #[test]
    fn test_average_rounds_half_up() {
        // テスト項目: 平均単語数は四捨五入される（2.5 -> 3）
        let messages: Vec<Message> = ["one two", "one two three"]
            .iter()
            .enumerate()
            .map(|(i, t)| {
                Message::new(
                    crate::domain::MessageId::new(i as u64 + 1),
                    user("alice"),
                    text(t),
                    Timestamp::new(0),
                )
            })
            .collect();

        assert_eq!(build_stats(&messages, 0).average_words_per_message, 3);
    }
}
