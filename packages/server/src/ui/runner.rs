//! Server startup.

use std::sync::Arc;

use kibun_shared::signal::shutdown_signal;
use tokio::net::TcpListener;

use super::{router::build_router, state::AppState};
use crate::{
    config::ServerConfig,
    domain::{HeuristicAnalyzer, SentimentAnalyzer},
    error::ServerError,
    infrastructure::classifier::GeminiAnalyzer,
};

/// Run the chat server until a shutdown signal arrives.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let window = config.delay_window()?;
    let analyzer = build_analyzer(&config)?;
    let state = Arc::new(AppState::new(analyzer, window));
    let app = build_router(state.clone());

    let addr = config.socket_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
    tracing::info!("Chat server listening on {}", addr);
    tracing::info!("WebSocket endpoint: ws://{}/ws", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;

    // In-flight analyses are dropped with the runtime
    let pending = state.scheduler.pending_count();
    if pending > 0 {
        tracing::warn!("Shutting down with {} analyses still pending", pending);
    }
    tracing::info!("Chat server stopped");
    Ok(())
}

fn build_analyzer(config: &ServerConfig) -> Result<Arc<dyn SentimentAnalyzer>, ServerError> {
    match config.gemini() {
        Some(gemini) => {
            tracing::info!("Sentiment analysis via Gemini model '{}'", gemini.model);
            Ok(Arc::new(GeminiAnalyzer::new(gemini)?))
        }
        None => {
            tracing::info!("GEMINI_API_KEY not set, using keyword heuristic only");
            Ok(Arc::new(HeuristicAnalyzer))
        }
    }
}
