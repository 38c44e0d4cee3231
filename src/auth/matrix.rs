//! Permission matrix
//!
//! Deny-by-default mapping from (role, resource) to the set of granted
//! actions. Absence of an entry is the normal "no grant" state, not an
//! error; that distinction belongs to the hierarchy table, where a missing
//! entry is fatal.

use crate::auth::rbac::{Action, Resource};
use crate::core::models::Role;
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

static NO_ACTIONS: Lazy<HashSet<Action>> = Lazy::new(HashSet::new);

/// Immutable role/resource grant table.
#[derive(Debug, Clone, Default)]
pub struct PermissionMatrix {
    grants: HashMap<Role, HashMap<Resource, HashSet<Action>>>,
}

impl PermissionMatrix {
    /// Empty matrix: every lookup denies.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The club's standing policy.
    ///
    /// Trainers, clients and members intentionally hold few or no blanket
    /// grants; their day-to-day access to their own records goes through the
    /// ownership branch of the decision engine instead.
    pub fn club_defaults() -> Self {
        let mut matrix = Self::empty();

        // Platform operator: everything, everywhere.
        for resource in Resource::ALL {
            matrix.grant(Role::SuperAdmin, resource, &Action::ALL);
        }

        use Action::{Create, Delete, Export, Manage, Read, Update};

        matrix.grant(Role::Admin, Resource::Users, &[Create, Read, Update, Delete, Manage]);
        matrix.grant(Role::Admin, Resource::Trainers, &[Create, Read, Update, Delete]);
        matrix.grant(Role::Admin, Resource::Clients, &[Create, Read, Update, Delete]);
        matrix.grant(Role::Admin, Resource::Schedule, &[Create, Read, Update, Delete]);
        matrix.grant(Role::Admin, Resource::Analytics, &[Read, Export]);
        matrix.grant(Role::Admin, Resource::Reports, &[Create, Read, Export]);
        matrix.grant(Role::Admin, Resource::Notifications, &[Create, Read, Update, Delete]);
        matrix.grant(Role::Admin, Resource::Settings, &[Read, Update]);

        matrix.grant(Role::Manager, Resource::Users, &[Create, Read, Update]);
        matrix.grant(Role::Manager, Resource::Trainers, &[Read, Update]);
        matrix.grant(Role::Manager, Resource::Clients, &[Create, Read, Update]);
        matrix.grant(Role::Manager, Resource::Schedule, &[Create, Read, Update, Delete]);
        matrix.grant(Role::Manager, Resource::Analytics, &[Read]);
        matrix.grant(Role::Manager, Resource::Reports, &[Read, Export]);
        matrix.grant(Role::Manager, Resource::Notifications, &[Create, Read]);
        matrix.grant(Role::Manager, Resource::Settings, &[Read]);

        // Trainers work almost entirely on owned records; the blanket grants
        // below are the two things ownership cannot express.
        matrix.grant(Role::Trainer, Resource::Schedule, &[Create]);
        matrix.grant(Role::Trainer, Resource::Notifications, &[Create]);

        matrix.grant(Role::Staff, Resource::Users, &[Read]);
        matrix.grant(Role::Staff, Resource::Trainers, &[Read]);
        matrix.grant(Role::Staff, Resource::Clients, &[Read]);
        matrix.grant(Role::Staff, Resource::Schedule, &[Create, Read, Update]);
        matrix.grant(Role::Staff, Resource::Notifications, &[Create, Read]);
        matrix.grant(Role::Staff, Resource::Settings, &[Read]);

        // Client and member rows are absent on purpose: deny-by-default plus
        // ownership covers their self-service surface.

        matrix
    }

    /// Add granted actions for a role on a resource. Additive; used while
    /// building the table, never after it is installed in the engine.
    pub fn grant(&mut self, role: Role, resource: Resource, actions: &[Action]) {
        self.grants
            .entry(role)
            .or_default()
            .entry(resource)
            .or_default()
            .extend(actions.iter().copied());
    }

    /// Granted actions for a role on a resource.
    ///
    /// Returns the empty set for absent entries; absence is a legitimate,
    /// frequent state and never a fallback grant.
    pub fn actions_of(&self, role: Role, resource: Resource) -> &HashSet<Action> {
        self.grants
            .get(&role)
            .and_then(|by_resource| by_resource.get(&resource))
            .unwrap_or(&NO_ACTIONS)
    }

    /// Whether the action is granted for the role on the resource.
    pub fn allows(&self, role: Role, resource: Resource, action: Action) -> bool {
        self.actions_of(role, resource).contains(&action)
    }
}
