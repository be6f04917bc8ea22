//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::{
    domain::{MessageText, UserId},
    infrastructure::dto::{
        http::{OnlineUsersDto, SendMessageRequest, SendMessageResponse, StatsDto},
        websocket::MessageDto,
    },
    ui::{error::ApiError, state::AppState},
    usecase::{GetStatsUseCase, SendMessageUseCase},
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Ingest a new message
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<Json<SendMessageResponse>, ApiError> {
    let Json(request) = payload?;

    // Missing and empty fields are reported together, before any length checks
    let (Some(user_id), Some(text)) = (
        request.user_id.filter(|s| !s.is_empty()),
        request.text.filter(|s| !s.is_empty()),
    ) else {
        return Err(ApiError::MissingFields);
    };

    // Convert String -> Domain Models
    let user_id = UserId::try_from(user_id)?;
    let text = MessageText::try_from(text)?;

    let usecase = SendMessageUseCase::new(
        state.messages.clone(),
        state.hub.clone(),
        state.scheduler.clone(),
    );
    let message_id = usecase.execute(user_id, text).await;

    Ok(Json(SendMessageResponse {
        success: true,
        message_id: message_id.value(),
    }))
}

/// Full message log in insertion order
pub async fn get_messages(State(state): State<Arc<AppState>>) -> Json<Vec<MessageDto>> {
    let messages = state.messages.all().await;
    Json(messages.iter().map(MessageDto::from).collect())
}

/// Aggregate chat statistics
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<StatsDto> {
    let usecase = GetStatsUseCase::new(state.messages.clone(), state.presence.clone());
    Json(usecase.execute().await)
}

/// Users currently online
pub async fn get_online_users(State(state): State<Arc<AppState>>) -> Json<OnlineUsersDto> {
    let users = state.presence.online_users().await;
    Json(OnlineUsersDto {
        count: users.len(),
        users: users.into_iter().map(UserId::into_string).collect(),
    })
}
