//! Request and response bodies.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Activity;

fn rfc3339(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Body of `POST /activity`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogActivityRequest {
    pub user_id: Option<String>,
    pub action: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDto {
    pub user_id: String,
    pub action: String,
    pub timestamp: String,
}

impl From<&Activity> for ActivityDto {
    fn from(activity: &Activity) -> Self {
        Self {
            user_id: activity.user_id.clone(),
            action: activity.action.clone(),
            timestamp: rfc3339(&activity.timestamp),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LogActivityResponse {
    pub success: bool,
    pub message: &'static str,
    pub activity: ActivityDto,
}

/// Per-user history entry; the user is implied by the path.
#[derive(Debug, Serialize)]
pub struct UserActivityDto {
    pub action: String,
    pub timestamp: String,
}

impl From<&Activity> for UserActivityDto {
    fn from(activity: &Activity) -> Self {
        Self {
            action: activity.action.clone(),
            timestamp: rfc3339(&activity.timestamp),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ActivitiesDto {
    pub total: usize,
    pub activities: Vec<ActivityDto>,
}

#[derive(Debug, Serialize)]
pub struct HealthDto {
    pub status: &'static str,
    pub timestamp: String,
}

impl HealthDto {
    pub fn ok() -> Self {
        Self {
            status: "OK",
            timestamp: kibun_shared::time::now_rfc3339(),
        }
    }
}
