use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handler::{all_activities, health_check, log_activity, user_activities, user_summary};
use crate::store::ActivityStore;

pub fn build_router(store: Arc<ActivityStore>) -> Router {
    Router::new()
        .route("/activity", post(log_activity))
        .route("/activity/{user_id}", get(user_activities))
        .route("/activity/{user_id}/summary", get(user_summary))
        .route("/activities", get(all_activities))
        .route("/health", get(health_check))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}
