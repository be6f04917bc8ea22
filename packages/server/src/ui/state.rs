//! Server state shared by every handler.

use std::sync::Arc;

use crate::{
    domain::{MessageRepository, PresenceRepository, SentimentAnalyzer},
    infrastructure::{
        broadcast::BroadcastHub,
        repository::{InMemoryMessageRepository, InMemoryPresenceRepository},
    },
    usecase::{DelayWindow, EnrichMessageUseCase, EnrichmentScheduler},
};

/// Shared application state
///
/// Built once at startup; every component gets its collaborators from here
/// instead of reaching for process-wide singletons.
pub struct AppState {
    /// Message store (append-only log)
    pub messages: Arc<dyn MessageRepository>,
    /// Online users and their connections
    pub presence: Arc<dyn PresenceRepository>,
    /// Fan-out to WebSocket observers
    pub hub: Arc<BroadcastHub>,
    /// Delayed sentiment analysis per message
    pub scheduler: Arc<EnrichmentScheduler>,
}

impl AppState {
    /// Wire in-memory storage, the hub and the scheduler around `analyzer`.
    pub fn new(analyzer: Arc<dyn SentimentAnalyzer>, window: DelayWindow) -> Self {
        let messages: Arc<dyn MessageRepository> = Arc::new(InMemoryMessageRepository::new());
        let presence: Arc<dyn PresenceRepository> = Arc::new(InMemoryPresenceRepository::new());
        let hub = Arc::new(BroadcastHub::new());

        let enrich = Arc::new(EnrichMessageUseCase::new(
            messages.clone(),
            analyzer,
            hub.clone(),
        ));
        let scheduler = Arc::new(EnrichmentScheduler::new(enrich, window));

        Self {
            messages,
            presence,
            hub,
            scheduler,
        }
    }
}
