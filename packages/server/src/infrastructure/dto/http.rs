//! HTTP API request and response DTOs for the chat server.

use serde::{Deserialize, Serialize};

/// Body of `POST /message`.
///
/// Both fields are optional at the serde level so that a missing field is
/// reported as a validation error rather than a JSON rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub user_id: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    pub success: bool,
    pub message_id: u64,
}

/// Response of `GET /stats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsDto {
    pub total_messages: usize,
    pub active_users: usize,
    pub sentiment_breakdown: SentimentBreakdownDto,
    pub average_words_per_message: u64,
    pub messages_with_emoji: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentBreakdownDto {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    pub pending: usize,
}

/// Response of `GET /users`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnlineUsersDto {
    pub count: usize,
    pub users: Vec<String>,
}

/// Error body returned with every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDto {
    pub error: String,
}
