//! Storage layer
//!
//! In-memory store behind the boundary the handlers talk to. Collections
//! are concurrent maps; handlers never reach into them directly, they go
//! through the CRUD surface here so the backing store can change without
//! touching route code.

use crate::core::models::{
    ClientRecord, ClubSettings, Notification, ScheduleEntry, TrainerProfile, UserAccount,
};
use dashmap::DashMap;
use std::sync::RwLock;
use tracing::info;

/// In-memory store for all club collections.
pub struct MemoryStore {
    users: DashMap<String, UserAccount>,
    trainers: DashMap<String, TrainerProfile>,
    clients: DashMap<String, ClientRecord>,
    schedule: DashMap<String, ScheduleEntry>,
    notifications: DashMap<String, Notification>,
    settings: RwLock<ClubSettings>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            trainers: DashMap::new(),
            clients: DashMap::new(),
            schedule: DashMap::new(),
            notifications: DashMap::new(),
            settings: RwLock::new(ClubSettings::default()),
        }
    }

    // --- users ---

    /// All user accounts, unscoped. Visibility filtering happens in the
    /// handler via the access engine.
    pub fn list_users(&self) -> Vec<UserAccount> {
        self.users.iter().map(|e| e.value().clone()).collect()
    }

    /// Look up a user by id
    pub fn get_user(&self, id: &str) -> Option<UserAccount> {
        self.users.get(id).map(|e| e.value().clone())
    }

    /// Whether a username is already taken
    pub fn username_taken(&self, username: &str) -> bool {
        self.users.iter().any(|e| e.value().username == username)
    }

    /// Insert or replace a user
    pub fn put_user(&self, user: UserAccount) {
        self.users.insert(user.id.clone(), user);
    }

    /// Remove a user; returns whether it existed
    pub fn delete_user(&self, id: &str) -> bool {
        self.users.remove(id).is_some()
    }

    // --- trainers ---

    /// All trainer profiles, unscoped
    pub fn list_trainers(&self) -> Vec<TrainerProfile> {
        self.trainers.iter().map(|e| e.value().clone()).collect()
    }

    /// Look up a trainer profile by id
    pub fn get_trainer(&self, id: &str) -> Option<TrainerProfile> {
        self.trainers.get(id).map(|e| e.value().clone())
    }

    /// Insert or replace a trainer profile
    pub fn put_trainer(&self, profile: TrainerProfile) {
        self.trainers.insert(profile.id.clone(), profile);
    }

    /// Remove a trainer profile; returns whether it existed
    pub fn delete_trainer(&self, id: &str) -> bool {
        self.trainers.remove(id).is_some()
    }

    // --- clients ---

    /// All client records, unscoped
    pub fn list_clients(&self) -> Vec<ClientRecord> {
        self.clients.iter().map(|e| e.value().clone()).collect()
    }

    /// Look up a client record by id
    pub fn get_client(&self, id: &str) -> Option<ClientRecord> {
        self.clients.get(id).map(|e| e.value().clone())
    }

    /// Insert or replace a client record
    pub fn put_client(&self, record: ClientRecord) {
        self.clients.insert(record.id.clone(), record);
    }

    /// Remove a client record; returns whether it existed
    pub fn delete_client(&self, id: &str) -> bool {
        self.clients.remove(id).is_some()
    }

    // --- schedule ---

    /// All schedule entries, unscoped
    pub fn list_schedule(&self) -> Vec<ScheduleEntry> {
        self.schedule.iter().map(|e| e.value().clone()).collect()
    }

    /// Look up a schedule entry by id
    pub fn get_schedule_entry(&self, id: &str) -> Option<ScheduleEntry> {
        self.schedule.get(id).map(|e| e.value().clone())
    }

    /// Insert or replace a schedule entry
    pub fn put_schedule_entry(&self, entry: ScheduleEntry) {
        self.schedule.insert(entry.id.clone(), entry);
    }

    /// Remove a schedule entry; returns whether it existed
    pub fn delete_schedule_entry(&self, id: &str) -> bool {
        self.schedule.remove(id).is_some()
    }

    // --- notifications ---

    /// All notifications, unscoped
    pub fn list_notifications(&self) -> Vec<Notification> {
        self.notifications.iter().map(|e| e.value().clone()).collect()
    }

    /// Look up a notification by id
    pub fn get_notification(&self, id: &str) -> Option<Notification> {
        self.notifications.get(id).map(|e| e.value().clone())
    }

    /// Insert or replace a notification
    pub fn put_notification(&self, notification: Notification) {
        self.notifications
            .insert(notification.id.clone(), notification);
    }

    // --- settings ---

    /// Current club settings
    pub fn get_settings(&self) -> ClubSettings {
        self.settings
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Replace club settings
    pub fn put_settings(&self, settings: ClubSettings) {
        *self
            .settings
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = settings;
    }

    /// Seed a small demo dataset: one account per role, a coached client
    /// and a couple of schedule entries. Used by dev setups and tests.
    pub fn seed_demo(&self) {
        use crate::core::models::Role;

        info!("Seeding demo data");

        let fixed = |id: &str, username: &str, role: Role| {
            let email = format!("{}@club.example", username);
            let mut user = UserAccount::new(username, email.as_str(), role);
            user.id = id.to_string();
            self.put_user(user);
        };

        fixed("root-1", "root", Role::SuperAdmin);
        fixed("admin-1", "dana.admin", Role::Admin);
        fixed("manager-1", "mel.manager", Role::Manager);
        fixed("trainer-1", "tom.trainer", Role::Trainer);
        fixed("trainer-2", "tara.trainer", Role::Trainer);
        fixed("staff-1", "sam.staff", Role::Staff);
        fixed("client-1", "cleo.client", Role::Client);
        fixed("member-1", "max.member", Role::Member);

        let mut profile = TrainerProfile::new("trainer-1", "Tom Trainer");
        profile.specialties = vec!["strength".into(), "mobility".into()];
        self.put_trainer(profile);
        self.put_trainer(TrainerProfile::new("trainer-2", "Tara Trainer"));

        let mut record = ClientRecord::new("Cleo Client");
        record.trainer_id = Some("trainer-1".into());
        record.member_user_id = Some("client-1".into());
        record.goals = Some("5k under 25 minutes".into());
        self.put_client(record);

        let mut other = ClientRecord::new("Walk-in Assessment");
        other.trainer_id = Some("trainer-2".into());
        self.put_client(other);

        let now = chrono::Utc::now();
        let mut session = ScheduleEntry::new(
            "Strength 1:1",
            "trainer-1",
            now + chrono::Duration::hours(24),
            now + chrono::Duration::hours(25),
        );
        session.client_id = Some("client-1".into());
        self.put_schedule_entry(session);
        self.put_schedule_entry(ScheduleEntry::new(
            "Mobility class",
            "trainer-2",
            now + chrono::Duration::hours(48),
            now + chrono::Duration::hours(49),
        ));

        self.put_notification(Notification::new(
            "client-1",
            "staff-1",
            "Welcome",
            "Your first session is booked.",
        ));
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Role;

    #[test]
    fn crud_round_trip() {
        let store = MemoryStore::new();
        let user = UserAccount::new("jane", "jane@club.example", Role::Staff);
        let id = user.id.clone();

        store.put_user(user);
        assert!(store.get_user(&id).is_some());
        assert!(store.username_taken("jane"));
        assert!(store.delete_user(&id));
        assert!(store.get_user(&id).is_none());
    }

    #[test]
    fn demo_seed_populates_collections() {
        let store = MemoryStore::new();
        store.seed_demo();

        assert!(!store.list_users().is_empty());
        assert!(!store.list_trainers().is_empty());
        assert!(!store.list_clients().is_empty());
        assert!(!store.list_schedule().is_empty());
        assert!(store.get_user("trainer-1").is_some());
    }

    #[test]
    fn settings_replacement() {
        let store = MemoryStore::new();
        let mut settings = store.get_settings();
        settings.maintenance_mode = true;
        store.put_settings(settings);
        assert!(store.get_settings().maintenance_mode);
    }
}
