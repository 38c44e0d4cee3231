//! Trainer profile model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public profile of a personal trainer.
///
/// Owned by the user account behind `user_id`; a trainer may edit their own
/// profile without holding a blanket grant on the trainers collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainerProfile {
    /// Unique identifier
    pub id: String,
    /// Owning user account
    pub user_id: String,
    /// Name shown on the schedule
    pub full_name: String,
    /// Short bio shown to members
    pub bio: Option<String>,
    /// Specialties (e.g. "strength", "mobility")
    pub specialties: Vec<String>,
    /// Whether the trainer currently accepts new clients
    pub accepting_clients: bool,
    /// Creation timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Last update timestamp
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl TrainerProfile {
    /// Create a profile owned by the given user account
    pub fn new<S: Into<String>>(user_id: S, full_name: S) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            full_name: full_name.into(),
            bio: None,
            specialties: Vec::new(),
            accepting_clients: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Owner identifier used for access decisions
    pub fn owner_id(&self) -> Option<&str> {
        Some(&self.user_id)
    }
}
