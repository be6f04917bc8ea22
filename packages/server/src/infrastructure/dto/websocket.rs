//! WebSocket message DTOs for the chat server.
//!
//! Every frame is a JSON object tagged by a kebab-case `type`; payload
//! fields are camelCase.

use serde::{Deserialize, Serialize};

use crate::domain::{Message, MessageId, Sentiment};

/// Wire form of a stored message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    pub id: u64,
    pub user_id: String,
    pub text: String,
    /// `pending` until the enrichment completes
    pub sentiment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotions: Option<Vec<String>>,
    /// RFC 3339
    pub timestamp: String,
    pub word_count: usize,
    pub has_emoji: bool,
}

impl From<&Message> for MessageDto {
    fn from(message: &Message) -> Self {
        let analysis = message.analysis.as_ref();
        Self {
            id: message.id.value(),
            user_id: message.user_id.as_str().to_string(),
            text: message.text.as_str().to_string(),
            sentiment: message
                .sentiment()
                .map_or("pending", |s| s.as_str())
                .to_string(),
            mood: analysis.map(|a| a.mood.clone()),
            confidence: analysis.map(|a| a.confidence),
            emotions: analysis.map(|a| a.emotions.clone()),
            timestamp: message.timestamp.to_rfc3339(),
            word_count: message.word_count,
            has_emoji: message.has_emoji,
        }
    }
}

/// Events pushed from the server to observers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ServerEvent {
    /// Full message log, sent once to a newly connected observer
    History { messages: Vec<MessageDto> },
    MessageCreated { message: MessageDto },
    MessageUpdated {
        message_id: MessageId,
        sentiment: Sentiment,
        mood: String,
        confidence: f64,
        emotions: Vec<String>,
    },
    PresenceJoined { user_id: String, timestamp: String },
    PresenceLeft { user_id: String, timestamp: String },
    PresenceCount { count: usize },
    TypingState { user_id: String, is_typing: bool },
    UserActivity {
        user_id: String,
        action: String,
        timestamp: String,
    },
    /// Sent only to the connection whose frame was rejected
    Error { message: String },
}

impl ServerEvent {
    pub fn history(messages: &[Message]) -> Self {
        ServerEvent::History {
            messages: messages.iter().map(MessageDto::from).collect(),
        }
    }

    pub fn message_created(message: &Message) -> Self {
        ServerEvent::MessageCreated {
            message: MessageDto::from(message),
        }
    }

    /// `None` while the message is still pending.
    pub fn message_updated(message: &Message) -> Option<Self> {
        let analysis = message.analysis.as_ref()?;
        Some(ServerEvent::MessageUpdated {
            message_id: message.id,
            sentiment: analysis.sentiment,
            mood: analysis.mood.clone(),
            confidence: analysis.confidence,
            emotions: analysis.emotions.clone(),
        })
    }

    /// Short name for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            ServerEvent::History { .. } => "history",
            ServerEvent::MessageCreated { .. } => "message-created",
            ServerEvent::MessageUpdated { .. } => "message-updated",
            ServerEvent::PresenceJoined { .. } => "presence-joined",
            ServerEvent::PresenceLeft { .. } => "presence-left",
            ServerEvent::PresenceCount { .. } => "presence-count",
            ServerEvent::TypingState { .. } => "typing-state",
            ServerEvent::UserActivity { .. } => "user-activity",
            ServerEvent::Error { .. } => "error",
        }
    }
}

/// Events sent by clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ClientEvent {
    PresenceJoin { user_id: String },
    Typing { user_id: String, is_typing: bool },
}
