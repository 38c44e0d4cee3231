//! Core data models for the club platform
//!
//! This module defines the domain records shared across handlers, storage,
//! and the access engine.

pub mod client;
pub mod notification;
pub mod schedule;
pub mod settings;
pub mod trainer;
pub mod user;

pub use client::ClientRecord;
pub use notification::Notification;
pub use schedule::{EntryStatus, ScheduleEntry};
pub use settings::ClubSettings;
pub use trainer::TrainerProfile;
pub use user::{Role, UserAccount, UserStatus};

use serde::{Deserialize, Serialize};

/// The authenticated caller of a request.
///
/// Produced entirely by the session collaborator in front of this service;
/// the access engine only ever consumes it as an input value and never
/// constructs or persists one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Stable account identifier
    pub id: String,
    /// Role carried by the session
    pub role: Role,
}

impl Principal {
    /// Create a principal value
    pub fn new<S: Into<String>>(id: S, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn principal_construction() {
        let p = Principal::new("u-1", Role::Trainer);
        assert_eq!(p.id, "u-1");
        assert_eq!(p.role, Role::Trainer);
    }
}
