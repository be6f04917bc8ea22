//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, ConnectionIdFactory, UserId},
    infrastructure::dto::websocket::{ClientEvent, ServerEvent},
    ui::state::AppState,
    usecase::{
        ConnectObserverUseCase, JoinPresenceUseCase, LeavePresenceUseCase, NotifyTypingUseCase,
    },
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection = ConnectionIdFactory::generate();
    let (mut sender, mut receiver) = socket.split();

    // Create a channel for this observer to receive events
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    // Register as observer; the history snapshot is queued first
    let connect_usecase = ConnectObserverUseCase::new(state.messages.clone(), state.hub.clone());
    if !connect_usecase.execute(connection, tx).await {
        tracing::warn!("Observer '{}' could not be registered", connection);
        return;
    }
    tracing::info!("Observer '{}' connected", connection);

    let state_clone = state.clone();

    // Spawn a task to receive frames from this observer
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error on '{}': {}", connection, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    handle_client_frame(&state_clone, connection, text.as_str()).await;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Observer '{}' requested close", connection);
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to forward hub events to this observer
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Unsubscribe and release presence
    let leave_usecase = LeavePresenceUseCase::new(state.presence.clone(), state.hub.clone());
    match leave_usecase.execute(connection).await {
        Some(departure) => tracing::info!(
            "Observer '{}' ({}) disconnected",
            connection,
            departure.user_id
        ),
        None => tracing::info!("Observer '{}' disconnected", connection),
    }
}

async fn handle_client_frame(state: &AppState, connection: ConnectionId, text: &str) {
    tracing::debug!("Received frame from '{}': {}", connection, text);

    let event = match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => event,
        Err(e) => {
            reject(state, connection, format!("invalid event: {e}")).await;
            return;
        }
    };

    match event {
        ClientEvent::PresenceJoin { user_id } => {
            // Convert String -> UserId (Domain Model)
            let user_id = match UserId::try_from(user_id) {
                Ok(id) => id,
                Err(e) => {
                    reject(state, connection, e.to_string()).await;
                    return;
                }
            };
            let usecase = JoinPresenceUseCase::new(state.presence.clone(), state.hub.clone());
            usecase.execute(connection, user_id).await;
        }
        ClientEvent::Typing { user_id, is_typing } => {
            let user_id = match UserId::try_from(user_id) {
                Ok(id) => id,
                Err(e) => {
                    reject(state, connection, e.to_string()).await;
                    return;
                }
            };
            let usecase = NotifyTypingUseCase::new(state.hub.clone());
            usecase.execute(connection, user_id, is_typing).await;
        }
    }
}

/// Report a rejected frame to its sender only; the connection stays open.
async fn reject(state: &AppState, connection: ConnectionId, message: String) {
    tracing::warn!("Rejected frame from '{}': {}", connection, message);
    state
        .hub
        .lock()
        .await
        .send_to(connection, &ServerEvent::Error { message });
}
