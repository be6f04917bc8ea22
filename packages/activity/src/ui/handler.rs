//! Activity API handlers.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::Utc;

use super::dto::{
    ActivitiesDto, ActivityDto, HealthDto, LogActivityRequest, LogActivityResponse,
    UserActivityDto,
};
use crate::{
    domain::Activity,
    error::ApiError,
    store::{ActivityStore, DEBUG_DUMP_LIMIT, USER_HISTORY_LIMIT},
};

pub async fn log_activity(
    State(store): State<Arc<ActivityStore>>,
    payload: Result<Json<LogActivityRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LogActivityResponse>), ApiError> {
    let Json(request) = payload?;
    let activity = Activity::new(request.user_id, request.action, Utc::now())?;
    tracing::info!(
        "Logged activity '{}' for '{}'",
        activity.action,
        activity.user_id
    );

    let response = LogActivityResponse {
        success: true,
        message: "Activity logged successfully",
        activity: ActivityDto::from(&activity),
    };
    store.record(activity);

    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn user_activities(
    State(store): State<Arc<ActivityStore>>,
    Path(user_id): Path<String>,
) -> Json<Vec<UserActivityDto>> {
    let recent = store.recent_for(&user_id, USER_HISTORY_LIMIT);
    Json(recent.iter().map(UserActivityDto::from).collect())
}

pub async fn user_summary(
    State(store): State<Arc<ActivityStore>>,
    Path(user_id): Path<String>,
) -> Json<BTreeMap<String, usize>> {
    Json(store.summary(&user_id))
}

/// Debug dump of the most recent activities
pub async fn all_activities(State(store): State<Arc<ActivityStore>>) -> Json<ActivitiesDto> {
    let (total, latest) = store.latest(DEBUG_DUMP_LIMIT);
    Json(ActivitiesDto {
        total,
        activities: latest.iter().map(ActivityDto::from).collect(),
    })
}

pub async fn health_check() -> Json<HealthDto> {
    Json(HealthDto::ok())
}
