//! Role-based access decisions
//!
//! The decision engine behind every privileged route handler and every UI
//! permission query. All functions are pure and synchronous over the two
//! tables frozen at startup; denial is a boolean outcome, never an error.

use crate::auth::hierarchy::RoleHierarchy;
use crate::auth::matrix::PermissionMatrix;
use crate::core::models::Role;
use serde::{Deserialize, Serialize};

/// Protected collection or domain.
///
/// Closed set; extending it means redeploying the permission matrix with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    /// User accounts
    Users,
    /// Trainer profiles
    Trainers,
    /// Coached-client records
    Clients,
    /// The session/class schedule
    Schedule,
    /// Aggregated usage analytics
    Analytics,
    /// Exportable reports
    Reports,
    /// In-app notifications
    Notifications,
    /// Platform operations
    System,
    /// Club-wide settings
    Settings,
}

impl Resource {
    /// Every declared resource.
    pub const ALL: [Resource; 9] = [
        Resource::Users,
        Resource::Trainers,
        Resource::Clients,
        Resource::Schedule,
        Resource::Analytics,
        Resource::Reports,
        Resource::Notifications,
        Resource::System,
        Resource::Settings,
    ];
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Resource::Users => "users",
            Resource::Trainers => "trainers",
            Resource::Clients => "clients",
            Resource::Schedule => "schedule",
            Resource::Analytics => "analytics",
            Resource::Reports => "reports",
            Resource::Notifications => "notifications",
            Resource::System => "system",
            Resource::Settings => "settings",
        };
        write!(f, "{}", name)
    }
}

/// Operation on a resource. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Create a record
    Create,
    /// Read a record or collection
    Read,
    /// Update a record
    Update,
    /// Delete a record
    Delete,
    /// Export data out of the platform
    Export,
    /// Import data into the platform
    Import,
    /// Administer the collection itself (assignments, role changes)
    Manage,
    /// Platform maintenance operations
    Maintenance,
}

impl Action {
    /// Every declared action.
    pub const ALL: [Action; 8] = [
        Action::Create,
        Action::Read,
        Action::Update,
        Action::Delete,
        Action::Export,
        Action::Import,
        Action::Manage,
        Action::Maintenance,
    ];

    /// Whether ownership of a record can satisfy this action on it.
    ///
    /// Only reading and updating one's own record are self-service;
    /// everything else needs an explicit matrix grant even on owned records.
    pub fn is_self_service(self) -> bool {
        matches!(self, Action::Read | Action::Update)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Export => "export",
            Action::Import => "import",
            Action::Manage => "manage",
            Action::Maintenance => "maintenance",
        };
        write!(f, "{}", name)
    }
}

/// The access decision engine.
///
/// Holds the two tables frozen at startup and answers every authorization
/// question from them. Stateless across requests: identical inputs always
/// produce identical verdicts, and the engine is safe to share across
/// request-handling tasks without locks.
#[derive(Debug, Clone)]
pub struct AccessEngine {
    hierarchy: RoleHierarchy,
    matrix: PermissionMatrix,
}

impl AccessEngine {
    /// Assemble the engine from validated tables.
    pub fn new(hierarchy: RoleHierarchy, matrix: PermissionMatrix) -> Self {
        Self { hierarchy, matrix }
    }

    /// The role hierarchy behind delegation decisions.
    pub fn hierarchy(&self) -> &RoleHierarchy {
        &self.hierarchy
    }

    /// The permission matrix behind blanket grants.
    pub fn matrix(&self) -> &PermissionMatrix {
        &self.matrix
    }

    /// Whether the role holds a blanket grant for the action on the resource.
    ///
    /// Pure matrix membership; absence of an entry means no.
    pub fn has_permission(&self, role: Role, resource: Resource, action: Action) -> bool {
        self.matrix.allows(role, resource, action)
    }

    /// Whether `acting` may manage (provision, reassign, delete) accounts of
    /// `target` role.
    ///
    /// Strictly rank-based: equal rank does not grant management over peers.
    pub fn can_manage_role(&self, acting: Role, target: Role) -> bool {
        self.hierarchy.outranks(acting, target)
    }

    /// Roles the acting role may provision, derived from
    /// [`can_manage_role`](Self::can_manage_role) so the two can never drift.
    pub fn creatable_roles_for(&self, acting: Role) -> Vec<Role> {
        Role::ALL
            .into_iter()
            .filter(|target| self.can_manage_role(acting, *target))
            .collect()
    }

    /// Whether the principal may perform `action` on a specific object.
    ///
    /// Grants through either branch: a blanket matrix grant, or ownership of
    /// the object for self-service actions (read/update). Ownership
    /// substitutes for a missing blanket grant; it never widens the action
    /// set beyond self-service, so e.g. deleting an owned record still needs
    /// a matrix grant. Objects without an owner concept (`owner_id` =
    /// `None`) are decided by the blanket branch alone.
    pub fn can_access_object(
        &self,
        role: Role,
        principal_id: &str,
        owner_id: Option<&str>,
        resource: Resource,
        action: Action,
    ) -> bool {
        if self.has_permission(role, resource, action) {
            return true;
        }
        match owner_id {
            Some(owner) => action.is_self_service() && owner == principal_id,
            None => false,
        }
    }

    /// Visible subset of a collection for the principal.
    ///
    /// With a blanket read grant the collection passes through unchanged;
    /// otherwise only items whose owner (per the caller-supplied `owner_of`
    /// capability) equals the principal id remain. Element-for-element this
    /// matches [`can_access_object`](Self::can_access_object) with
    /// [`Action::Read`], which is what keeps list and detail endpoints from
    /// ever disagreeing.
    pub fn filter_by_permission<T, F>(
        &self,
        items: Vec<T>,
        role: Role,
        principal_id: &str,
        resource: Resource,
        owner_of: F,
    ) -> Vec<T>
    where
        F: Fn(&T) -> Option<&str>,
    {
        if self.has_permission(role, resource, Action::Read) {
            return items;
        }
        items
            .into_iter()
            .filter(|item| owner_of(item) == Some(principal_id))
            .collect()
    }
}

impl Default for AccessEngine {
    /// Engine over the club's built-in tables.
    fn default() -> Self {
        Self::new(RoleHierarchy::default(), PermissionMatrix::club_defaults())
    }
}
