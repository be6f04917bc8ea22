//! In-memory activity log.

use std::{
    collections::BTreeMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

use crate::domain::Activity;

/// Records returned by [`ActivityStore::recent_for`].
pub const USER_HISTORY_LIMIT: usize = 10;
/// Records returned by [`ActivityStore::latest`].
pub const DEBUG_DUMP_LIMIT: usize = 20;

/// Append-only activity log in insertion order
#[derive(Debug, Default)]
pub struct ActivityStore {
    activities: Mutex<Vec<Activity>>,
}

impl ActivityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, activity: Activity) {
        self.lock().push(activity);
    }

    /// Up to `limit` activities of `user_id`, newest first.
    pub fn recent_for(&self, user_id: &str, limit: usize) -> Vec<Activity> {
        let mut recent: Vec<Activity> = self
            .lock()
            .iter()
            .rev()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        // Stable: equal timestamps keep the newer insertion first
        recent.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        recent.truncate(limit);
        recent
    }

    /// Number of activities of `user_id` per action.
    pub fn summary(&self, user_id: &str) -> BTreeMap<String, usize> {
        let mut summary = BTreeMap::new();
        for activity in self.lock().iter().filter(|a| a.user_id == user_id) {
            *summary.entry(activity.action.clone()).or_insert(0) += 1;
        }
        summary
    }

    /// Total count and the last `limit` activities in insertion order.
    pub fn latest(&self, limit: usize) -> (usize, Vec<Activity>) {
        let activities = self.lock();
        let start = activities.len().saturating_sub(limit);
        (activities.len(), activities[start..].to_vec())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Activity>> {
        self.activities
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
