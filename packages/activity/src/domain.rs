//! Activity record and its validation.

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActivityError {
    #[error("userId and action are required")]
    MissingFields,
}

/// One logged user action. Never mutated after it is recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub user_id: String,
    pub action: String,
    pub timestamp: DateTime<Utc>,
}

impl Activity {
    /// Both `user_id` and `action` must be present and non-empty.
    pub fn new(
        user_id: Option<String>,
        action: Option<String>,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, ActivityError> {
        match (
            user_id.filter(|s| !s.is_empty()),
            action.filter(|s| !s.is_empty()),
        ) {
            (Some(user_id), Some(action)) => Ok(Self {
                user_id,
                action,
                timestamp,
            }),
            _ => Err(ActivityError::MissingFields),
        }
    }
}
