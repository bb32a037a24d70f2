use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use utoipa::ToSchema;

pub const SUCCESS_MESSAGE: &str = "Prediction complete";
pub const FAILURE_MESSAGE: &str =
    "Failed to get prediction. Make sure the backend is running.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
}

/// Transient message shown after a submission settles.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: &str, ttl: Duration) -> Self {
        let issued_at = Utc::now();
        Notification {
            kind,
            message: message.to_string(),
            issued_at,
            expires_at: issued_at + ttl,
        }
    }

    pub fn success(ttl: Duration) -> Self {
        Self::new(NotificationKind::Success, SUCCESS_MESSAGE, ttl)
    }

    pub fn failure(ttl: Duration) -> Self {
        Self::new(NotificationKind::Error, FAILURE_MESSAGE, ttl)
    }

    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}
