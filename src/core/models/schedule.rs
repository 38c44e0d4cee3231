//! Schedule entry model

use super::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A booked training session or class slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Unique identifier
    pub id: String,
    /// Session title shown on the board
    pub title: String,
    /// Trainer running the session (owner on the trainer side)
    pub trainer_id: String,
    /// Booked client, if this is a 1:1 session
    pub client_id: Option<String>,
    /// Session start
    pub starts_at: chrono::DateTime<chrono::Utc>,
    /// Session end
    pub ends_at: chrono::DateTime<chrono::Utc>,
    /// Booking status
    pub status: EntryStatus,
    /// Creation timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Last update timestamp
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl ScheduleEntry {
    /// Create an entry run by the given trainer
    pub fn new<S: Into<String>>(
        title: S,
        trainer_id: S,
        starts_at: chrono::DateTime<chrono::Utc>,
        ends_at: chrono::DateTime<chrono::Utc>,
    ) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            trainer_id: trainer_id.into(),
            client_id: None,
            starts_at,
            ends_at,
            status: EntryStatus::Confirmed,
            created_at: now,
            updated_at: now,
        }
    }

    /// Owner identifier for access decisions, from the viewer's side.
    ///
    /// Trainers own the sessions they run; clients and members own the
    /// sessions booked for them.
    pub fn owner_for(&self, viewer: Role) -> Option<&str> {
        match viewer {
            Role::Client | Role::Member => self.client_id.as_deref(),
            _ => Some(&self.trainer_id),
        }
    }
}

/// Booking status of a schedule entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    /// Slot is booked and will run
    Confirmed,
    /// Cancelled by either side, kept for history
    Cancelled,
    /// Session took place
    Completed,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> ScheduleEntry {
        let start = chrono::Utc::now();
        let mut e = ScheduleEntry::new("Strength 1:1", "t-1", start, start + chrono::Duration::hours(1));
        e.client_id = Some("c-7".into());
        e
    }

    #[test]
    fn trainer_owns_own_sessions() {
        assert_eq!(entry().owner_for(Role::Trainer), Some("t-1"));
    }

    #[test]
    fn client_owns_booked_sessions() {
        assert_eq!(entry().owner_for(Role::Client), Some("c-7"));
        let open = ScheduleEntry::new(
            "Open gym",
            "t-1",
            chrono::Utc::now(),
            chrono::Utc::now() + chrono::Duration::hours(2),
        );
        assert_eq!(open.owner_for(Role::Client), None);
    }
}
