//! Session domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use satchel_shared::time::from_unix_seconds;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    /// Seconds since the epoch
    pub expires_at: i64,
    pub user_id: String,
}

impl Session {
    /// Valid up to and including `expires_at`.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now > self.expires_at
    }

    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        from_unix_seconds(self.expires_at)
    }
}
