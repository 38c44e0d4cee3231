//! User account models
//!
//! This module defines user accounts and the closed role vocabulary.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    /// Unique identifier (also the principal id of this account's sessions)
    pub id: String,
    /// Username (unique)
    pub username: String,
    /// Email address (unique)
    pub email: String,
    /// Display name
    pub display_name: Option<String>,
    /// Account role
    pub role: Role,
    /// Account status
    pub status: UserStatus,
    /// Creation timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Last update timestamp
    pub updated_at: chrono::DateTime<chrono::Utc>,
    /// Last login timestamp
    pub last_login_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl UserAccount {
    /// Create a new account with a fresh id
    pub fn new<S: Into<String>>(username: S, email: S, role: Role) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            username: username.into(),
            email: email.into(),
            display_name: None,
            role,
            status: UserStatus::Active,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }

    /// Whether the account may hold sessions
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }
}

/// Account role
///
/// The set is closed on purpose: the hierarchy table and permission matrix
/// must cover every variant, and a role outside this enum cannot reach the
/// access engine at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Platform operator
    SuperAdmin,
    /// Club administrator
    Admin,
    /// Floor/department manager
    Manager,
    /// Personal trainer
    Trainer,
    /// Front-desk staff
    Staff,
    /// Coached client
    Client,
    /// Regular gym member
    Member,
}

impl Role {
    /// Every declared role, highest authority first.
    pub const ALL: [Role; 7] = [
        Role::SuperAdmin,
        Role::Admin,
        Role::Manager,
        Role::Trainer,
        Role::Staff,
        Role::Client,
        Role::Member,
    ];

    /// Dense index used by the hierarchy table.
    pub(crate) const fn index(self) -> usize {
        match self {
            Role::SuperAdmin => 0,
            Role::Admin => 1,
            Role::Manager => 2,
            Role::Trainer => 3,
            Role::Staff => 4,
            Role::Client => 5,
            Role::Member => 6,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::SuperAdmin => write!(f, "super-admin"),
            Role::Admin => write!(f, "admin"),
            Role::Manager => write!(f, "manager"),
            Role::Trainer => write!(f, "trainer"),
            Role::Staff => write!(f, "staff"),
            Role::Client => write!(f, "client"),
            Role::Member => write!(f, "member"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super-admin" => Ok(Role::SuperAdmin),
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            "trainer" => Ok(Role::Trainer),
            "staff" => Ok(Role::Staff),
            "client" => Ok(Role::Client),
            "member" => Ok(Role::Member),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// Account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    /// Account may log in
    Active,
    /// Temporarily disabled by an administrator
    Suspended,
    /// Closed account kept for records
    Archived,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn role_round_trip() {
        for role in Role::ALL {
            let parsed = Role::from_str(&role.to_string()).expect("display output must parse");
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn role_rejects_unknown() {
        assert!(Role::from_str("owner").is_err());
        assert!(Role::from_str("").is_err());
    }

    #[test]
    fn role_indices_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for role in Role::ALL {
            assert!(seen.insert(role.index()));
        }
    }

    #[test]
    fn new_account_is_active() {
        let account = UserAccount::new("anna", "anna@example.com", Role::Staff);
        assert!(account.is_active());
        assert_eq!(account.role, Role::Staff);
    }
}
