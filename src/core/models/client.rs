//! Coached-client record model

use super::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Record of a coached client.
///
/// Ownership is dual: the assigned trainer owns the record for coaching
/// purposes (`trainer_id`), and the member behind it owns it for
/// self-service (`member_user_id`). Which field counts as "owner" depends on
/// who is looking, see [`ClientRecord::owner_for`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientRecord {
    /// Unique identifier
    pub id: String,
    /// Assigned trainer (user account id)
    pub trainer_id: Option<String>,
    /// Member user account behind this record
    pub member_user_id: Option<String>,
    /// Client name
    pub full_name: String,
    /// Training goals, free text
    pub goals: Option<String>,
    /// Coaching notes, visible to the trainer side only
    pub notes: Option<String>,
    /// Creation timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Last update timestamp
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl ClientRecord {
    /// Create a record for a named client
    pub fn new<S: Into<String>>(full_name: S) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            trainer_id: None,
            member_user_id: None,
            full_name: full_name.into(),
            goals: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Owner identifier for access decisions, from the viewer's side.
    ///
    /// Trainers own the records assigned to them; clients and members own
    /// the record backed by their own account. Other roles go through
    /// blanket grants and get the trainer side, which is irrelevant to them.
    pub fn owner_for(&self, viewer: Role) -> Option<&str> {
        match viewer {
            Role::Client | Role::Member => self.member_user_id.as_deref(),
            _ => self.trainer_id.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_follows_viewer_side() {
        let mut record = ClientRecord::new("Jo Miller");
        record.trainer_id = Some("t-1".into());
        record.member_user_id = Some("m-9".into());

        assert_eq!(record.owner_for(Role::Trainer), Some("t-1"));
        assert_eq!(record.owner_for(Role::Client), Some("m-9"));
        assert_eq!(record.owner_for(Role::Member), Some("m-9"));
        assert_eq!(record.owner_for(Role::Admin), Some("t-1"));
    }

    #[test]
    fn unassigned_record_has_no_owner() {
        let record = ClientRecord::new("Jo Miller");
        assert_eq!(record.owner_for(Role::Trainer), None);
        assert_eq!(record.owner_for(Role::Client), None);
    }
}
