//! Notification model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// In-app notification delivered to a single account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Unique identifier
    pub id: String,
    /// Receiving user account (owner for access decisions)
    pub recipient_id: String,
    /// Account that sent the notification
    pub created_by: String,
    /// Short subject line
    pub subject: String,
    /// Message body
    pub body: String,
    /// Whether the recipient has opened it
    pub read: bool,
    /// Creation timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Notification {
    /// Create a notification for the given recipient
    pub fn new<S: Into<String>>(recipient_id: S, created_by: S, subject: S, body: S) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            recipient_id: recipient_id.into(),
            created_by: created_by.into(),
            subject: subject.into(),
            body: body.into(),
            read: false,
            created_at: chrono::Utc::now(),
        }
    }

    /// Owner identifier used for access decisions
    pub fn owner_id(&self) -> Option<&str> {
        Some(&self.recipient_id)
    }
}
