//! Club settings model

use serde::{Deserialize, Serialize};

/// Club-wide settings.
///
/// Settings have no owner; only blanket grants apply to them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClubSettings {
    /// Display name of the club
    pub club_name: String,
    /// IANA timezone the schedule is shown in
    pub timezone: String,
    /// Opening hour, 0-23
    pub opening_hour: u8,
    /// Closing hour, 0-23
    pub closing_hour: u8,
    /// When set, booking endpoints reject new entries
    pub maintenance_mode: bool,
    /// Last update timestamp
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Default for ClubSettings {
    fn default() -> Self {
        Self {
            club_name: "Clubdesk".to_string(),
            timezone: "UTC".to_string(),
            opening_hour: 6,
            closing_hour: 22,
            maintenance_mode: false,
            updated_at: chrono::Utc::now(),
        }
    }
}
