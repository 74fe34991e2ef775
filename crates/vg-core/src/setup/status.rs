use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether initial authentication setup has been completed, persisted across restarts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupStatus {
    pub has_completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl SetupStatus {
    pub fn completed_at(at: DateTime<Utc>) -> Self {
        Self {
            has_completed: true,
            completed_at: Some(at),
        }
    }
}
