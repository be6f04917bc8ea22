//! Core domain models for the chat server.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::value_object::{MessageId, MessageText, Timestamp, UserId};

/// Terminal sentiment of a classified message.
///
/// There is deliberately no `Pending` variant: a message is pending exactly
/// while it carries no [`Analysis`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying a message text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub sentiment: Sentiment,
    pub mood: String,
    /// Classifier confidence in `[0.0, 1.0]`.
    pub confidence: f64,
    pub emotions: Vec<String>,
}

/// Represents a chat message in the domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub user_id: UserId,
    pub text: MessageText,
    pub timestamp: Timestamp,
    /// Whitespace-separated token count, fixed at creation
    pub word_count: usize,
    /// Whether the text contains an emoji, fixed at creation
    pub has_emoji: bool,
    /// `None` while the enrichment is pending
    pub analysis: Option<Analysis>,
}

impl Message {
    /// Create a new, not yet classified message
    pub fn new(id: MessageId, user_id: UserId, text: MessageText, timestamp: Timestamp) -> Self {
        let word_count = count_words(text.as_str());
        let has_emoji = contains_emoji(text.as_str());
        Self {
            id,
            user_id,
            text,
            timestamp,
            word_count,
            has_emoji,
            analysis: None,
        }
    }

    /// Whether the enrichment has not completed yet
    pub fn is_pending(&self) -> bool {
        self.analysis.is_none()
    }

    /// Terminal sentiment, if classified
    pub fn sentiment(&self) -> Option<Sentiment> {
        self.analysis.as_ref().map(|a| a.sentiment)
    }

    /// Apply an enrichment result in place.
    ///
    /// Replaces any earlier analysis, so applying the same analysis twice
    /// leaves the message unchanged.
    pub fn apply_analysis(&mut self, analysis: Analysis) {
        self.analysis = Some(analysis);
    }
}

fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Emoticons, misc symbols and pictographs, transport and map symbols, regional indicators.
fn contains_emoji(text: &str) -> bool {
    text.chars().any(|c| {
        matches!(
            c as u32,
            0x1F600..=0x1F64F | 0x1F300..=0x1F5FF | 0x1F680..=0x1F6FF | 0x1F1E0..=0x1F1FF
        )
    })
}
